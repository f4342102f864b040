//! word_of_the_day tool implementation.
//!
//! Always succeeds: when every source fails, a word from the static list is
//! returned.

use lexicon_client::Lexicon;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;

/// Implementation of the word_of_the_day tool.
pub async fn wotd_impl(lexicon: &Lexicon) -> Result<CallToolResult, McpError> {
    let word = lexicon.wotd.fetch().await;
    json_result(&word)
}
