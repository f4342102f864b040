//! Unified error types for lexicon.
//!
//! Callers only ever need to tell [`Error::NotFound`] apart from everything
//! else; the rest collapse into a generic "try again" message for display.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Message shown for any lookup failure that is not a missing word.
pub const TRY_AGAIN_MESSAGE: &str =
    "Unable to fetch word definition. Please check your internet connection and try again.";

/// Unified error types for lexicon.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty word).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The upstream dictionary has no entry for the word.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Any upstream failure other than a missing word.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// A required API key has not been configured or stored.
    #[error("MISSING_API_KEY: {0}")]
    MissingApiKey(String),

    /// Generative fallback returned an error or empty content.
    #[error("AI_FAILED: {0}")]
    AiFailed(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Stored value could not be encoded or decoded.
    #[error("STORE_ERROR: serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Message suitable for an end user.
    ///
    /// Not-found and input errors keep their own message; anything else
    /// collapses into [`TRY_AGAIN_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Error::NotFound(msg) | Error::InvalidInput(msg) | Error::MissingApiKey(msg) => msg.clone(),
            _ => TRY_AGAIN_MESSAGE.to_string(),
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::Network(msg) => (-32003, msg.clone()),
            Error::MissingApiKey(msg) => (-32004, msg.clone()),
            Error::AiFailed(msg) => (-32005, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::Serialization(msg) => (-32002, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("\"zzzxcv\" could not be found in the dictionary.".to_string());
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("zzzxcv"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::NotFound("zzzxcv".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let mcp_err: McpError = Error::Network("timeout".to_string()).into();
        assert_eq!(mcp_err.code.0, -32003);
    }

    #[test]
    fn test_user_message_collapses_other_failures() {
        assert_eq!(Error::Network("connection reset".into()).user_message(), TRY_AGAIN_MESSAGE);
        assert_eq!(Error::Serialization("bad json".into()).user_message(), TRY_AGAIN_MESSAGE);
        assert_eq!(Error::NotFound("missing".into()).user_message(), "missing");
        assert!(Error::NotFound("missing".into()).is_not_found());
        assert!(!Error::Network("x".into()).is_not_found());
    }
}
