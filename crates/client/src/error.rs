//! Upstream client error types.

use std::sync::Arc;

use lexicon_core::Error;

/// Errors from any upstream HTTP service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// The service answered but has no entry for the request.
    #[error("not found: {0}")]
    NotFound(String),

    /// A key the service requires was not supplied.
    #[error("missing API key: {0}")]
    MissingApiKey(String),

    /// Request could not be built (bad base URL, empty word).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the service.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound(_))
    }

    /// Map a non-success status to an error. 404 is reported as `NotFound`.
    pub(crate) fn from_status(status: reqwest::StatusCode, what: &str) -> Self {
        match status.as_u16() {
            404 => UpstreamError::NotFound(what.to_string()),
            401 | 403 => UpstreamError::AuthError,
            429 => UpstreamError::RateLimited,
            code => UpstreamError::HttpError { status: code },
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { UpstreamError::Timeout } else { UpstreamError::Network(Arc::new(err)) }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Parse(err.to_string())
    }
}

impl From<UpstreamError> for Error {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound(msg) => Error::NotFound(msg),
            UpstreamError::MissingApiKey(msg) => Error::MissingApiKey(msg),
            UpstreamError::InvalidRequest(msg) => Error::InvalidInput(msg),
            other => Error::Network(other.to_string()),
        }
    }
}
