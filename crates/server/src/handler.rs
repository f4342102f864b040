//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use lexicon_client::Lexicon;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::tools::ai_key::{AiKeySetParams, ai_key_clear_impl, ai_key_set_impl};
use crate::tools::cache::{clear_impl, purge_impl, stats_impl};
use crate::tools::define::{DefineParams, define_ai_impl, define_impl};
use crate::tools::history::{HistoryListParams, history_clear_impl, history_list_impl};
use crate::tools::suggest::{SuggestParams, suggest_impl};
use crate::tools::wotd::wotd_impl;

/// The main MCP server handler for lexicon.
#[derive(Clone)]
pub struct LexiconServer {
    lexicon: Arc<Lexicon>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl LexiconServer {
    /// Create a new server handler around the shared services.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon, tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Define an English word. Served from the local cache when possible. Fails with NOT_FOUND (-32001) for unknown words; try define_ai then."
    )]
    async fn define(&self, params: Parameters<DefineParams>) -> Result<CallToolResult, McpError> {
        define_impl(&self.lexicon, params.0).await
    }

    #[tool(description = "Ask a generative model to define a word. Requires a key stored with ai_key_set.")]
    async fn define_ai(&self, params: Parameters<DefineParams>) -> Result<CallToolResult, McpError> {
        define_ai_impl(&self.lexicon, params.0).await
    }

    #[tool(description = "Suggest up to 6 word completions for a partial word of at least 2 characters.")]
    async fn suggest(&self, params: Parameters<SuggestParams>) -> Result<CallToolResult, McpError> {
        suggest_impl(&self.lexicon, params.0).await
    }

    #[tool(description = "Today's word of the day with definition, example and part of speech.")]
    async fn word_of_the_day(&self) -> Result<CallToolResult, McpError> {
        wotd_impl(&self.lexicon).await
    }

    #[tool(description = "List past searches, newest first, including stored results. Optional substring filter.")]
    async fn history_list(&self, params: Parameters<HistoryListParams>) -> Result<CallToolResult, McpError> {
        history_list_impl(&self.lexicon, params.0).await
    }

    #[tool(description = "Delete the search history.")]
    async fn history_clear(&self) -> Result<CallToolResult, McpError> {
        history_clear_impl(&self.lexicon).await
    }

    #[tool(description = "Count cached words and history entries and report cache size in KB.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.lexicon).await
    }

    #[tool(description = "Clear cached definitions, search history and words of the day. The AI key is kept.")]
    async fn cache_clear(&self) -> Result<CallToolResult, McpError> {
        clear_impl(&self.lexicon).await
    }

    #[tool(description = "Remove expired dictionary entries and old words of the day.")]
    async fn cache_purge_expired(&self) -> Result<CallToolResult, McpError> {
        purge_impl(&self.lexicon).await
    }

    #[tool(description = "Store the Gemini API key used by define_ai.")]
    async fn ai_key_set(&self, params: Parameters<AiKeySetParams>) -> Result<CallToolResult, McpError> {
        ai_key_set_impl(&self.lexicon, params.0).await
    }

    #[tool(description = "Forget the stored Gemini API key.")]
    async fn ai_key_clear(&self) -> Result<CallToolResult, McpError> {
        ai_key_clear_impl(&self.lexicon).await
    }
}

impl ServerHandler for LexiconServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "lexicon".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "English dictionary with a local cache, search history, word of the day and completions.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
