use crate::auth::validate_access_token;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Json,
};
use medimatch_common::{validation, Claims};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// Extractor that validates a JWT Bearer token and provides the claims.
/// Use `AuthUser` as a handler argument for required auth.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        self.0
            .sub
            .parse()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("Invalid user ID in token")))
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|val| val.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Access denied. No token provided."))?;

        let claims = validate_access_token(token, &state.config.auth.jwt_secret)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
        Ok(AuthUser(claims))
    }
}

/// JSON extractor that schema-checks the body before the handler runs.
/// Malformed JSON and failed field rules both surface as enveloped 400s.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + validator::Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        validation::check(&value)?;
        Ok(ValidatedJson(value))
    }
}
