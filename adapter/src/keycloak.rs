//! Decoding of Keycloak bearer tokens into the caller's identity claims.

use anyhow::Context;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use kernel::model::identity::TokenClaims;
use shared::{
    config::KeycloakConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct KeycloakTokenVerifier {
    key: DecodingKey,
    validation: Validation,
    client_id: String,
}

impl KeycloakTokenVerifier {
    /// Builds a verifier from the realm configuration.
    ///
    /// Without a configured realm public key the token signature is not
    /// checked and only the expiry is enforced.
    pub fn new(cfg: &KeycloakConfig) -> anyhow::Result<Self> {
        match &cfg.public_key {
            Some(pem) => {
                let key = DecodingKey::from_rsa_pem(normalize_pem(pem).as_bytes())
                    .context("KEYCLOAK_PUBLIC_KEY is not a valid RSA public key")?;
                let mut validation = Validation::new(Algorithm::RS256);
                validation.set_issuer(&[cfg.issuer()]);
                // Keycloak のアクセストークンの aud は "account" になるため azp で確認する
                validation.validate_aud = false;
                Ok(Self::with_key(key, validation, &cfg.client_id))
            }
            None => {
                tracing::warn!(
                    realm = %cfg.realm,
                    "KEYCLOAK_PUBLIC_KEY is not set, bearer token signatures are not verified"
                );
                Ok(Self::unverified(&cfg.client_id))
            }
        }
    }

    pub fn with_key(key: DecodingKey, validation: Validation, client_id: &str) -> Self {
        Self {
            key,
            validation,
            client_id: client_id.to_string(),
        }
    }

    pub fn unverified(client_id: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        Self::with_key(DecodingKey::from_secret(&[]), validation, client_id)
    }

    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = decode::<TokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| AppError::UnauthorizedError(format!("invalid bearer token: {e}")))?
            .claims;

        match claims.azp.as_deref() {
            Some(azp) if azp != self.client_id => Err(AppError::UnauthorizedError(format!(
                "bearer token was issued to another client: {azp}"
            ))),
            _ => Ok(claims),
        }
    }
}

// 環境変数では改行なしの鍵本体だけが渡されることが多い
fn normalize_pem(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("-----BEGIN") {
        raw.replace("\\n", "\n")
    } else {
        format!("-----BEGIN PUBLIC KEY-----\n{raw}\n-----END PUBLIC KEY-----")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";
    const ISSUER: &str = "https://auth.example.com/realms/Rooms";

    fn exp() -> i64 {
        chrono::Utc::now().timestamp() + 300
    }

    fn mint(claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    fn verifying() -> KeycloakTokenVerifier {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_aud = false;
        KeycloakTokenVerifier::with_key(DecodingKey::from_secret(SECRET), validation, "webapp")
    }

    #[test]
    fn decodes_identity_claims() {
        let token = mint(json!({
            "exp": exp(),
            "iss": ISSUER,
            "azp": "webapp",
            "name": "Jan de Vries",
            "preferred_username": "jdevries",
        }));
        let claims = verifying().verify(&token).unwrap();
        assert_eq!(claims.contact_person().unwrap().as_str(), "Jan de Vries");
    }

    #[test]
    fn rejects_foreign_signatures() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "exp": exp(), "iss": ISSUER, "name": "Jan" }),
            &EncodingKey::from_secret(b"someone-else"),
        )
        .unwrap();
        assert!(matches!(
            verifying().verify(&token),
            Err(AppError::UnauthorizedError(_))
        ));
    }

    #[test]
    fn rejects_tokens_of_other_clients() {
        let token = mint(json!({ "exp": exp(), "iss": ISSUER, "azp": "other", "name": "Jan" }));
        assert!(verifying().verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_tokens() {
        let token = mint(json!({ "exp": 1_000, "iss": ISSUER, "name": "Jan" }));
        assert!(verifying().verify(&token).is_err());
        assert!(KeycloakTokenVerifier::unverified("webapp")
            .verify(&token)
            .is_err());
    }

    #[test]
    fn unverified_mode_still_decodes_claims() {
        let token = mint(json!({ "exp": exp(), "preferred_username": "jdevries" }));
        let claims = KeycloakTokenVerifier::unverified("webapp")
            .verify(&token)
            .unwrap();
        assert_eq!(claims.contact_person().unwrap().as_str(), "jdevries");
    }

    #[test]
    fn rejects_garbage() {
        assert!(KeycloakTokenVerifier::unverified("webapp")
            .verify("not-a-token")
            .is_err());
    }

    #[test]
    fn wraps_bare_key_bodies() {
        assert_eq!(
            normalize_pem("MIIB"),
            "-----BEGIN PUBLIC KEY-----\nMIIB\n-----END PUBLIC KEY-----"
        );
        assert!(normalize_pem("-----BEGIN PUBLIC KEY-----\\nMIIB").contains('\n'));
    }
}
