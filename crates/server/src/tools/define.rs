//! define and define_ai tool implementations.
//!
//! `define` answers from the dictionary cache or the configured dictionary.
//! A missing word fails with the NOT_FOUND code so the caller can fall back
//! to `define_ai`.

use lexicon_client::Lexicon;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the define and define_ai tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DefineParams {
    /// The word to define.
    pub word: String,
}

/// Implementation of the define tool.
pub async fn define_impl(lexicon: &Lexicon, params: DefineParams) -> Result<CallToolResult, McpError> {
    let lookup = lexicon.lookup.search(&params.word).await?;
    json_result(&lookup)
}

/// Implementation of the define_ai tool.
pub async fn define_ai_impl(lexicon: &Lexicon, params: DefineParams) -> Result<CallToolResult, McpError> {
    let definition = lexicon.lookup.ai_search(&params.word).await?;
    json_result(&definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{make_lexicon, output_json};
    use lexicon_core::{Definition, DictionarySourceKind, LookupResult, Meaning};

    #[tokio::test]
    async fn test_define_empty_word() {
        let lexicon = make_lexicon().await;
        let result = define_impl(&lexicon, DefineParams { word: "  ".into() }).await;
        assert_eq!(result.unwrap_err().code.0, -32602);
    }

    #[tokio::test]
    async fn test_define_served_from_cache() {
        let lexicon = make_lexicon().await;
        let cached = LookupResult {
            word: "ephemeral".into(),
            pronunciation: None,
            meanings: vec![Meaning {
                part_of_speech: "adjective".into(),
                definitions: vec![Definition {
                    definition: "Lasting for a short period of time.".into(),
                    example: None,
                    synonyms: vec![],
                    antonyms: vec![],
                }],
            }],
            source: DictionarySourceKind::DictionaryApi,
            timestamp: 0,
        };
        lexicon.lookup.cache().put("ephemeral", &cached).await.unwrap();

        let result = define_impl(&lexicon, DefineParams { word: "Ephemeral".into() }).await.unwrap();
        let json = output_json(&result);
        assert_eq!(json["fromCache"], true);
        assert_eq!(json["result"]["word"], "ephemeral");
        assert_eq!(json["result"]["meanings"][0]["partOfSpeech"], "adjective");
    }

    #[tokio::test]
    async fn test_define_ai_without_key() {
        let lexicon = make_lexicon().await;
        let result = define_ai_impl(&lexicon, DefineParams { word: "sonder".into() }).await;
        assert_eq!(result.unwrap_err().code.0, -32004);
    }
}
