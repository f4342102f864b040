//! MCP tool implementations.
//!
//! This module contains all tools exposed by the lexicon server. Every tool
//! answers with pretty-printed JSON text content.

pub mod ai_key;
pub mod cache;
pub mod define;
pub mod history;
pub mod suggest;
pub mod wotd;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ToolError;

pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(|e| ToolError::Serialization(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
