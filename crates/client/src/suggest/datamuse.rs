//! Remote word suggestions from Datamuse (`https://api.datamuse.com/sug`).

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::http::HttpConfig;

/// Default Datamuse suggestion endpoint.
pub const DATAMUSE_SUG_URL: &str = "https://api.datamuse.com/sug";

/// A remote completion provider.
#[async_trait]
pub trait SuggestionSource: Send + Sync + std::fmt::Debug {
    /// Up to `max` completions for `query`, best first.
    async fn suggest(&self, query: &str, max: usize) -> Result<Vec<String>, UpstreamError>;
}

/// One item of a Datamuse `sug` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DatamuseWord {
    pub word: String,
    #[serde(default)]
    pub score: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DatamuseClient {
    http: reqwest::Client,
    url: String,
}

impl DatamuseClient {
    pub fn new(config: HttpConfig, url: &str) -> Result<Self, UpstreamError> {
        Ok(Self { http: config.build()?, url: url.to_string() })
    }

    pub fn parse_body(bytes: &[u8]) -> Result<Vec<String>, UpstreamError> {
        let items: Vec<DatamuseWord> = serde_json::from_slice(bytes)?;
        Ok(items.into_iter().map(|item| item.word).filter(|w| !w.is_empty()).collect())
    }
}

#[async_trait]
impl SuggestionSource for DatamuseClient {
    async fn suggest(&self, query: &str, max: usize) -> Result<Vec<String>, UpstreamError> {
        let start = Instant::now();
        let max = max.to_string();

        let response = self
            .http
            .get(&self.url)
            .query(&[("s", query), ("max", max.as_str())])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let words = Self::parse_body(&bytes)?;
        tracing::debug!("Datamuse returned {} suggestions in {:?}", words.len(), start.elapsed());
        Ok(words)
    }
}
