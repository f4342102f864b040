//! Errors raised by the tool layer itself.
//!
//! Service errors arrive as `lexicon_core::Error` and convert directly.

use lexicon_client::SuggestError;
use rmcp::model::{ErrorCode, ErrorData as McpError};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// A newer suggestion request replaced this one.
    #[error("SUPERSEDED: {0}")]
    Superseded(String),

    /// Tool output could not be encoded.
    #[error("SERIALIZATION_FAILED: {0}")]
    Serialization(String),
}

impl From<SuggestError> for ToolError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::Superseded => ToolError::Superseded(err.to_string()),
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let (code, message) = match &err {
            ToolError::Superseded(msg) => (-32800, msg.clone()),
            ToolError::Serialization(msg) => (-32603, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_code() {
        let err: McpError = ToolError::from(SuggestError::Superseded).into();
        assert_eq!(err.code.0, -32800);
        assert!(err.message.contains("superseded"));
    }
}
