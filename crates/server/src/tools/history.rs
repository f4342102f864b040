//! history_list and history_clear tool implementations.

use lexicon_client::Lexicon;
use lexicon_core::HistoryEntry;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

const DEFAULT_LIMIT: usize = 50;

/// Input parameters for the history_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryListParams {
    /// Only entries whose word contains this text (case-insensitive).
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum entries to return, newest first (default 50).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output from the history_list tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct HistoryListOutput {
    /// Number of matching entries before the limit was applied.
    pub total: usize,
    pub entries: Vec<HistoryEntry>,
}

/// Output from the history_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryClearOutput {
    /// Whether there was any history to remove.
    pub cleared: bool,
}

/// Implementation of the history_list tool.
pub async fn history_list_impl(lexicon: &Lexicon, params: HistoryListParams) -> Result<CallToolResult, McpError> {
    let history = lexicon.lookup.history();
    let mut entries = match params.filter.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => history.filter(needle).await,
        _ => history.list().await,
    };

    let total = entries.len();
    entries.truncate(params.limit.unwrap_or(DEFAULT_LIMIT));

    json_result(&HistoryListOutput { total, entries })
}

/// Implementation of the history_clear tool.
pub async fn history_clear_impl(lexicon: &Lexicon) -> Result<CallToolResult, McpError> {
    let cleared = lexicon.lookup.history().clear().await?;
    json_result(&HistoryClearOutput { cleared })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{make_lexicon, output_json};

    #[tokio::test]
    async fn test_history_list_filter_and_limit() {
        let lexicon = make_lexicon().await;
        for word in ["sonder", "Serendipity", "luminous", "serene"] {
            lexicon.lookup.history().record(word, None).await.unwrap();
        }

        let json = output_json(&history_list_impl(&lexicon, HistoryListParams::default()).await.unwrap());
        assert_eq!(json["total"], 4);
        assert_eq!(json["entries"][0]["word"], "serene");

        let params = HistoryListParams { filter: Some("SER".into()), limit: Some(1) };
        let json = output_json(&history_list_impl(&lexicon, params).await.unwrap());
        assert_eq!(json["total"], 2);
        assert_eq!(json["entries"].as_array().unwrap().len(), 1);
        assert_eq!(json["entries"][0]["displayWord"], "serene");
    }

    #[tokio::test]
    async fn test_history_clear() {
        let lexicon = make_lexicon().await;
        lexicon.lookup.history().record("sonder", None).await.unwrap();

        let json = output_json(&history_clear_impl(&lexicon).await.unwrap());
        assert_eq!(json["cleared"], true);
        assert!(lexicon.lookup.history().is_empty().await);

        let json = output_json(&history_clear_impl(&lexicon).await.unwrap());
        assert_eq!(json["cleared"], false);
    }
}
