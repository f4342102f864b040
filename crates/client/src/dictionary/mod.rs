//! Dictionary lookup clients.
//!
//! Two upstreams are supported:
//!
//! - **Free Dictionary API** (`https://api.dictionaryapi.dev/api/v2/entries/en/<word>`):
//!   no key. Answers with an array of entries, or an error-shaped object when
//!   the word is unknown. Anything other than a non-empty array is "not found".
//! - **Words API** (`https://wordsapiv1.p.rapidapi.com/words/<word>/`):
//!   authenticated with `X-RapidAPI-Key` / `X-RapidAPI-Host`.
//!
//! No retries: a failed lookup is reported once and the caller decides.

pub mod response;

pub use response::{
    DictionaryApiEntry, UpstreamEntry, WordsApiPronunciation, WordsApiResponse, WordsApiResult,
};

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use lexicon_core::{AppConfig, DictionaryProvider, DictionarySourceKind};
use reqwest::header;

use crate::error::UpstreamError;
use crate::http::{HttpConfig, join_segments};

/// Default base URL for the Free Dictionary API.
pub const DICTIONARY_API_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2";

/// Default base URL for Words API.
pub const WORDS_API_BASE_URL: &str = "https://wordsapiv1.p.rapidapi.com";

/// Something that can look a word up.
#[async_trait]
pub trait DictionarySource: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> DictionarySourceKind;

    /// Look up `word` (already trimmed, never empty).
    async fn lookup(&self, word: &str) -> Result<UpstreamEntry, UpstreamError>;
}

/// Build the configured dictionary source.
pub fn source_from_config(config: &AppConfig) -> Result<Arc<dyn DictionarySource>, UpstreamError> {
    let http = HttpConfig::from(config);
    match config.dictionary_provider {
        DictionaryProvider::DictionaryApi => Ok(Arc::new(DictionaryApiClient::new(http, DICTIONARY_API_BASE_URL)?)),
        DictionaryProvider::WordsApi => {
            let key = config
                .require_rapidapi_key()
                .map_err(|e| UpstreamError::MissingApiKey(e.to_string()))?;
            Ok(Arc::new(WordsApiClient::new(http, WORDS_API_BASE_URL, &config.rapidapi_host, key)?))
        }
    }
}

/// Free Dictionary API client.
#[derive(Debug, Clone)]
pub struct DictionaryApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl DictionaryApiClient {
    pub fn new(config: HttpConfig, base_url: &str) -> Result<Self, UpstreamError> {
        Ok(Self { http: config.build()?, base_url: base_url.to_string() })
    }

    /// Interpret a response body. Only a non-empty array counts as found.
    pub fn parse_body(word: &str, bytes: &[u8]) -> Result<DictionaryApiEntry, UpstreamError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        match value {
            serde_json::Value::Array(entries) if !entries.is_empty() => {
                let first = entries.into_iter().next().unwrap_or_default();
                Ok(serde_json::from_value(first)?)
            }
            _ => Err(not_found(word, "Dictionary API")),
        }
    }
}

#[async_trait]
impl DictionarySource for DictionaryApiClient {
    fn kind(&self) -> DictionarySourceKind {
        DictionarySourceKind::DictionaryApi
    }

    async fn lookup(&self, word: &str) -> Result<UpstreamEntry, UpstreamError> {
        let url = join_segments(&self.base_url, &["entries", "en", word])?;
        let start = Instant::now();

        tracing::debug!("looking up in Dictionary API: word={}", word);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Dictionary API response status: {}", status);

        if !status.is_success() {
            return Err(UpstreamError::from_status(status, &not_found_message(word, "Dictionary API")));
        }

        let bytes = response.bytes().await?;
        let entry = Self::parse_body(word, &bytes)?;

        tracing::debug!("lookup completed in {:?}", start.elapsed());
        Ok(UpstreamEntry::DictionaryApi(entry))
    }
}

/// Words API client (RapidAPI).
#[derive(Debug, Clone)]
pub struct WordsApiClient {
    http: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl WordsApiClient {
    pub fn new(config: HttpConfig, base_url: &str, host: &str, api_key: &str) -> Result<Self, UpstreamError> {
        if api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey("Words API requires a RapidAPI key".into()));
        }
        Ok(Self {
            http: config.build()?,
            base_url: base_url.to_string(),
            host: host.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Interpret a response body. A payload without a headword is not found.
    pub fn parse_body(word: &str, bytes: &[u8]) -> Result<WordsApiResponse, UpstreamError> {
        let response: WordsApiResponse = serde_json::from_slice(bytes)?;
        if response.word.as_deref().is_none_or(str::is_empty) {
            return Err(not_found(word, "Words API"));
        }
        Ok(response)
    }
}

#[async_trait]
impl DictionarySource for WordsApiClient {
    fn kind(&self) -> DictionarySourceKind {
        DictionarySourceKind::WordsApi
    }

    async fn lookup(&self, word: &str) -> Result<UpstreamEntry, UpstreamError> {
        // Words API expects a trailing slash after the word.
        let url = join_segments(&self.base_url, &["words", word, ""])?;

        tracing::debug!("looking up in Words API: word={}", word);

        let response = self
            .http
            .get(url)
            .header("X-RapidAPI-Host", &self.host)
            .header("X-RapidAPI-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Words API response status: {}", status);

        if !status.is_success() {
            return Err(UpstreamError::from_status(status, &not_found_message(word, "Words API")));
        }

        let bytes = response.bytes().await?;
        Ok(UpstreamEntry::WordsApi(Self::parse_body(word, &bytes)?))
    }
}

fn not_found_message(word: &str, source: &str) -> String {
    format!("\"{word}\" could not be found in {source}.")
}

fn not_found(word: &str, source: &str) -> UpstreamError {
    UpstreamError::NotFound(not_found_message(word, source))
}
