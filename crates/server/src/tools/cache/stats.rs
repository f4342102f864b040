//! cache_stats tool implementation.

use lexicon_client::Lexicon;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::tools::json_result;

/// Implementation of the cache_stats tool.
pub async fn stats_impl(lexicon: &Lexicon) -> Result<CallToolResult, McpError> {
    let stats = lexicon.stats().await?;
    json_result(&stats)
}
