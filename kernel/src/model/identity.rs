use serde::Deserialize;

/// The person claiming ownership of a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPerson(String);

impl ContactPerson {
    // 前後の空白を除いて空文字になる場合は None
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, owner: &str) -> bool {
        self.0.to_lowercase() == owner.trim().to_lowercase()
    }
}

/// Claims of a Keycloak access token relevant for identifying the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub azp: Option<String>,
}

impl TokenClaims {
    // 表示名を優先し、なければユーザー名を使う
    pub fn contact_person(&self) -> Option<ContactPerson> {
        self.name
            .as_deref()
            .and_then(ContactPerson::new)
            .or_else(|| {
                self.preferred_username
                    .as_deref()
                    .and_then(ContactPerson::new)
            })
    }
}
