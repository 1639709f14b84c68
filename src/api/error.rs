//! API error types for the wallet REST API client.

use thiserror::Error;

/// API-specific error type for the wallet REST API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Bad client configuration (TLS material, malformed env values).
    /// Fatal at startup, before any command runs.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Resource not found (404)
    #[error("not found: {0}")]
    NotFound(ErrorResponse),

    /// Invalid request parameters (400)
    #[error("bad request: {0}")]
    BadRequest(ErrorResponse),

    /// Permission denied (403)
    #[error("permission denied: {0}")]
    Forbidden(ErrorResponse),

    /// Resource already exists or state conflict (409)
    #[error("conflict: {0}")]
    Conflict(ErrorResponse),

    /// Server-side error (5xx)
    #[error("server error: {0}")]
    ServerError(ErrorResponse),

    /// Unexpected HTTP status code
    #[error("unexpected status {0}: {1}")]
    UnexpectedStatus(u16, ErrorResponse),

    /// JSON deserialization error
    #[error("deserialization error: {0}")]
    Deserialize(String),

    /// Internal dry-run sentinel: the request was printed instead of sent.
    /// Callers recognize and swallow this; it is never an operator-visible
    /// failure.
    #[error("request dry-run")]
    DryRun,
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Structured error payload returned by the wallet API.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: Option<String>,
    /// Machine-readable error code, e.g. `wallet_not_responding`
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Wrap a non-JSON error body.
    pub fn from_text(text: impl Into<String>) -> Self {
        ErrorResponse {
            message: Some(text.into()),
            code: None,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.message, &self.code) {
            (Some(message), Some(code)) => write!(f, "{message} (code: {code})"),
            (Some(message), None) => write!(f, "{message}"),
            (None, Some(code)) => write!(f, "code: {code}"),
            (None, None) => write!(f, "unknown error"),
        }
    }
}
