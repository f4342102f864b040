//! ai_key_set and ai_key_clear tool implementations.
//!
//! The key is stored under `gemini_api_key` and never echoed back.

use lexicon_client::Lexicon;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the ai_key_set tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AiKeySetParams {
    /// Gemini API key used by define_ai.
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AiKeyOutput {
    /// Whether a key is stored after the call.
    pub stored: bool,
}

/// Implementation of the ai_key_set tool.
pub async fn ai_key_set_impl(lexicon: &Lexicon, params: AiKeySetParams) -> Result<CallToolResult, McpError> {
    lexicon.store.set_gemini_api_key(&params.api_key).await?;
    tracing::info!("Gemini API key stored");
    json_result(&AiKeyOutput { stored: true })
}

/// Implementation of the ai_key_clear tool.
pub async fn ai_key_clear_impl(lexicon: &Lexicon) -> Result<CallToolResult, McpError> {
    lexicon.store.clear_gemini_api_key().await?;
    json_result(&AiKeyOutput { stored: false })
}
