//! cache_purge_expired tool implementation.
//!
//! Drops dictionary entries past their TTL and words of the day outside the
//! retention window.

use lexicon_client::Lexicon;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Output from the cache_purge_expired tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CachePurgeOutput {
    /// Expired dictionary entries removed.
    pub purged_words: usize,
    /// Word-of-the-day days removed.
    pub pruned_days: usize,
}

/// Implementation of the cache_purge_expired tool.
pub async fn purge_impl(lexicon: &Lexicon) -> Result<CallToolResult, McpError> {
    let purged_words = lexicon.lookup.cache().purge_expired().await?;
    let pruned_days = lexicon.wotd.cache().prune().await?;

    json_result(&CachePurgeOutput { purged_words, pruned_days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{make_lexicon, output_json};

    #[tokio::test]
    async fn test_purge_empty_store() {
        let lexicon = make_lexicon().await;
        let json = output_json(&purge_impl(&lexicon).await.unwrap());
        assert_eq!(json["purgedWords"], 0);
        assert_eq!(json["prunedDays"], 0);
        assert!(json.get("purged_words").is_none());
    }
}
