use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    Json,
};
use kernel::model::identity::ContactPerson;
use registry::AppRegistry;
use serde::de::DeserializeOwned;
use shared::error::AppError;

pub const CONTACT_PERSON_HEADER: &str = "x-contact-person";

/// The identity a caller claims for itself.
///
/// Taken from a Keycloak bearer token when one is sent, otherwise from the
/// `x-contact-person` header.
pub struct ClaimedContactPerson(pub ContactPerson);

impl FromRequestParts<AppRegistry> for ClaimedContactPerson {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(&parts.headers) {
            let claims = registry.token_verifier().verify(token)?;
            if let Some(person) = claims.contact_person() {
                return Ok(Self(person));
            }
        }

        parts
            .headers
            .get(CONTACT_PERSON_HEADER)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .and_then(ContactPerson::new)
            .map(Self)
            .ok_or(AppError::MissingIdentity)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// JSON request body whose rejections are reported as `AppError`.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string counterpart of [`JsonBody`].
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
