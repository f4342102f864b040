//! cache_clear tool implementation.
//!
//! Removes cached definitions, search history and words of the day. The stored
//! API key survives.

use lexicon_client::Lexicon;
use lexicon_core::CacheStats;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearOutput {
    /// Statistics after clearing.
    pub stats: CacheStats,
}

/// Implementation of the cache_clear tool.
pub async fn clear_impl(lexicon: &Lexicon) -> Result<CallToolResult, McpError> {
    lexicon.clear_all().await?;
    let stats = lexicon.stats().await?;
    json_result(&CacheClearOutput { stats })
}
