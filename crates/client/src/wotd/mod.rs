//! Word of the day.
//!
//! ### Fallback chain
//!
//! 1. Today's cached entry, if any
//! 2. Primary source: `https://api.wotd.site/word`
//! 3. Backup source: Wordnik `wordOfTheDay` (only when a key is configured)
//! 4. A static word picked by day of month
//!
//! Whatever answers is cached under today's date.

pub mod fallback;
pub mod response;

pub use fallback::fallback_word;
pub use response::{WordnikPayload, WotdPayload, WotdSitePayload};

use std::sync::Arc;

use async_trait::async_trait;
use lexicon_core::{AppConfig, Clock, WordOfTheDay, WotdCache, WotdSourceKind};
use reqwest::header;

use crate::error::UpstreamError;
use crate::http::HttpConfig;

/// Default URL for the primary source.
pub const WOTD_SITE_URL: &str = "https://api.wotd.site/word";

/// Default URL for the Wordnik source.
pub const WORDNIK_URL: &str = "https://api.wordnik.com/v4/words.json/wordOfTheDay";

/// A remote word-of-the-day provider.
#[async_trait]
pub trait WotdSource: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> WotdSourceKind;

    async fn fetch(&self) -> Result<WotdPayload, UpstreamError>;
}

/// Client for `api.wotd.site`.
#[derive(Debug, Clone)]
pub struct WotdSiteClient {
    http: reqwest::Client,
    url: String,
}

impl WotdSiteClient {
    pub fn new(config: HttpConfig, url: &str) -> Result<Self, UpstreamError> {
        Ok(Self { http: config.build()?, url: url.to_string() })
    }
}

#[async_trait]
impl WotdSource for WotdSiteClient {
    fn kind(&self) -> WotdSourceKind {
        WotdSourceKind::WotdSite
    }

    async fn fetch(&self) -> Result<WotdPayload, UpstreamError> {
        let response = self
            .http
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        Ok(WotdPayload::WotdSite(serde_json::from_slice(&bytes)?))
    }
}

/// Client for Wordnik's word of the day.
#[derive(Debug, Clone)]
pub struct WordnikClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl WordnikClient {
    pub fn new(config: HttpConfig, url: &str, api_key: &str) -> Result<Self, UpstreamError> {
        if api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey("Wordnik requires an API key".into()));
        }
        Ok(Self { http: config.build()?, url: url.to_string(), api_key: api_key.to_string() })
    }
}

#[async_trait]
impl WotdSource for WordnikClient {
    fn kind(&self) -> WotdSourceKind {
        WotdSourceKind::Wordnik
    }

    async fn fetch(&self) -> Result<WotdPayload, UpstreamError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("api_key", self.api_key.as_str())])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(UpstreamError::AuthError);
        }
        if !status.is_success() {
            return Err(UpstreamError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        Ok(WotdPayload::Wordnik(serde_json::from_slice(&bytes)?))
    }
}

/// Build the configured source chain, primary first.
pub fn sources_from_config(config: &AppConfig) -> Result<Vec<Arc<dyn WotdSource>>, UpstreamError> {
    let http = HttpConfig::from(config);
    let mut sources: Vec<Arc<dyn WotdSource>> = vec![Arc::new(WotdSiteClient::new(http.clone(), WOTD_SITE_URL)?)];

    match config.wordnik_api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => sources.push(Arc::new(WordnikClient::new(http, WORDNIK_URL, key)?)),
        None => tracing::debug!("no Wordnik key configured; backup word-of-the-day source disabled"),
    }

    Ok(sources)
}

/// Word-of-the-day service: daily cache in front of the source chain.
#[derive(Debug, Clone)]
pub struct WordOfTheDayService {
    cache: WotdCache,
    sources: Vec<Arc<dyn WotdSource>>,
    clock: Arc<dyn Clock>,
}

impl WordOfTheDayService {
    pub fn new(cache: WotdCache, sources: Vec<Arc<dyn WotdSource>>, clock: Arc<dyn Clock>) -> Self {
        Self { cache, sources, clock }
    }

    pub fn cache(&self) -> &WotdCache {
        &self.cache
    }

    /// Today's word. Never fails: the static list is the last resort.
    pub async fn fetch(&self) -> WordOfTheDay {
        if let Some(cached) = self.cache.today().await {
            tracing::debug!("word of the day cache hit: {}", cached.word);
            return cached;
        }

        for source in &self.sources {
            match source.fetch().await {
                Ok(payload) => return self.remember(payload.normalize()).await,
                Err(e) => tracing::warn!(source = ?source.kind(), "word of the day source failed, trying next: {}", e),
            }
        }

        tracing::info!("all word of the day sources failed, using fallback list");
        self.remember(fallback_word(self.clock.today())).await
    }

    async fn remember(&self, entry: WordOfTheDay) -> WordOfTheDay {
        match self.cache.store_today(entry.clone()).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("failed to cache word of the day: {}", e);
                entry
            }
        }
    }
}
