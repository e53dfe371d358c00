use thiserror::Error;

use crate::llm::LlmError;

/// Errors from validating a request at the relay boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("attachment is missing a mime type")]
    MissingMimeType,

    #[error("attachment data is not valid base64: {0}")]
    InvalidAttachment(String),
}

/// Errors from relaying a chat request to the upstream model.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid chat request: {0}")]
    Invalid(#[from] ValidationError),

    #[error("upstream model failed: {0}")]
    Upstream(#[from] LlmError),
}

/// Errors from repository operations (used by trait definitions in relaychat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors seen by the chat client when talking to the relay server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("relay returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("persistence queue is closed")]
    QueueClosed,
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },

    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
