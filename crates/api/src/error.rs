use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lostfound_core::document::ValidationError;
use lostfound_core::{FlagError, StoreError};
use serde_json::json;

/// API error type mapped to JSON error responses.
///
/// Bodies are `{"error": "<message>", "type", "statusCode"}`, plus
/// `details` on 500s.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal error: {0}")]
    Internal(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<FlagError> for ApiError {
    fn from(err: FlagError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "methodNotAllowed",
                "Method not allowed".to_string(),
            ),
            ApiError::Store(StoreError::RevisionMismatch { key, .. }) => (
                StatusCode::CONFLICT,
                "conflict",
                format!("{key} was modified by another writer"),
            ),
            ApiError::Store(StoreError::AlreadyExists { key }) => (
                StatusCode::CONFLICT,
                "conflict",
                format!("{key} already exists"),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                details = Some(msg.clone());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Store(err) => {
                tracing::error!("Storage error: {err}");
                details = Some(err.to_string());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "Internal server error".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "type": error_type,
            "statusCode": status.as_u16(),
        });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
