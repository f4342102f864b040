//! suggest tool implementation.

use lexicon_client::{Lexicon, SuggestionOrigin, Suggestions};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::error::ToolError;

/// Input parameters for the suggest tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SuggestParams {
    /// Partial word typed so far (at least 2 characters).
    pub query: String,

    /// Only consult the bundled word list.
    #[serde(default)]
    pub local_only: bool,
}

/// Implementation of the suggest tool.
pub async fn suggest_impl(lexicon: &Lexicon, params: SuggestParams) -> Result<CallToolResult, McpError> {
    let suggestions = if params.local_only {
        Suggestions {
            words: lexicon.suggest.local(&params.query),
            query: params.query.trim().to_string(),
            origin: SuggestionOrigin::Local,
        }
    } else {
        lexicon.suggest.suggest(&params.query).await.map_err(ToolError::from)?
    };

    json_result(&suggestions)
}
