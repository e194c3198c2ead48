use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use medimatch_common::FieldError;
use serde_json::json;
use std::sync::OnceLock;

/// Whether 500 responses carry the error chain. Set once at startup from
/// the configured environment; defaults to off (production-safe).
static DEV_ERRORS: OnceLock<bool> = OnceLock::new();

pub fn enable_dev_errors(enabled: bool) {
    let _ = DEV_ERRORS.set(enabled);
}

fn dev_errors() -> bool {
    *DEV_ERRORS.get().unwrap_or(&false)
}

/// Error taxonomy for the HTTP API. Every failure funnels through
/// `into_response`, producing the uniform `{success, message, errors?}`
/// envelope.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with field-level details
    Validation(Vec<FieldError>),
    /// 400 with a single message
    BadRequest(String),
    /// 401; messages stay generic to avoid account enumeration
    Unauthorized(String),
    /// 404
    NotFound(String),
    /// 409 duplicate unique field
    Conflict(String),
    /// 500 catch-all for store/mailer failures
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors, detail) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(errors),
                None,
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None, None),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, None, None),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None, None),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message, None, None),
            ApiError::Internal(err) => {
                tracing::error!("Internal server error: {:#}", err);
                let detail = dev_errors().then(|| format!("{:#}", err));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    detail,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "message": message,
        });
        if let Some(errors) = errors {
            body["errors"] = json!(errors);
        }
        if let Some(detail) = detail {
            body["detail"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}
