//! Application error type mapping to HTTP status codes and `{error}` bodies.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use relaychat_types::error::{RelayError, RepositoryError};
use relaychat_types::llm::LlmError;
use relaychat_types::wire::ErrorBody;

/// Body sent for every upstream failure. The cause is only logged.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Gemini API error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid request body.
    Validation(String),
    /// Request body over the configured size limit.
    PayloadTooLarge(String),
    /// The generative model call failed.
    Upstream(LlmError),
    /// Transcript storage failed.
    Repository(RepositoryError),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Invalid(v) => AppError::Validation(v.to_string()),
            RelayError::Upstream(u) => AppError::Upstream(u),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Validation(e.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPSTREAM_ERROR_MESSAGE.to_string(),
            ),
            AppError::Repository(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
