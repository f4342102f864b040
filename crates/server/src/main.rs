//! lexicon server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use lexicon_client::Lexicon;
use lexicon_core::{AppConfig, KvStore, SystemClock};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!(db_path = %config.db_path.display(), "Starting lexicon server on stdio transport");

    let store = KvStore::open(&config.db_path).await?;
    let lexicon = Lexicon::from_config(&config, store, Arc::new(SystemClock))?;

    if let Err(e) = lexicon.maintain().await {
        tracing::warn!("startup cache maintenance failed: {}", e);
    }

    let handler = handler::LexiconServer::new(Arc::new(lexicon));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
