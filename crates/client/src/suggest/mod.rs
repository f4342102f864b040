//! Word suggestions while typing.
//!
//! Local matches from the bundled list are always available. When there are
//! fewer than `enrich_threshold` of them, the remote source is asked after the
//! debounce delay and its words are merged in behind the local ones. Only
//! enriched lists are cached.
//!
//! Every call supersedes the previous one: its cancellation token fires, and
//! the older call returns [`SuggestError::Superseded`] without touching the
//! cache.

pub mod cancel;
pub mod datamuse;
pub mod local;
pub mod navigation;
pub mod query_cache;

pub use cancel::CancelToken;
pub use datamuse::{DATAMUSE_SUG_URL, DatamuseClient, SuggestionSource};
pub use local::LocalWordList;
pub use navigation::{BoxPhase, KeyOutcome, NavKey, SuggestionBox};
pub use query_cache::QueryCache;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lexicon_core::AppConfig;
use serde::Serialize;

use crate::error::UpstreamError;
use crate::http::HttpConfig;

/// Suggestion tuning.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    pub min_query_len: usize,
    pub max_results: usize,
    pub enrich_threshold: usize,
    pub debounce: Duration,
    pub cache_capacity: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            max_results: 6,
            enrich_threshold: 3,
            debounce: Duration::from_millis(250),
            cache_capacity: query_cache::DEFAULT_CAPACITY,
        }
    }
}

impl From<&AppConfig> for SuggestConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            min_query_len: config.suggest_min_query_len,
            max_results: config.suggest_max_results,
            enrich_threshold: config.suggest_enrich_threshold,
            debounce: config.suggest_debounce(),
            cache_capacity: config.suggest_cache_capacity,
        }
    }
}

/// Where a suggestion list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionOrigin {
    Cache,
    Local,
    Enriched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub query: String,
    pub words: Vec<String>,
    pub origin: SuggestionOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    #[error("superseded by a newer query")]
    Superseded,
}

/// Append `remote` to `local`, skipping case-insensitive duplicates, capped at `cap`.
pub fn merge(local: &[String], remote: &[String], cap: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(cap);
    let mut seen: HashSet<String> = HashSet::with_capacity(cap);
    for word in local.iter().chain(remote) {
        if merged.len() >= cap {
            break;
        }
        if seen.insert(word.to_lowercase()) {
            merged.push(word.clone());
        }
    }
    merged
}

/// Build the remote source, or none when remote suggestions are disabled.
pub fn source_from_config(config: &AppConfig) -> Result<Option<Arc<dyn SuggestionSource>>, UpstreamError> {
    if !config.remote_suggestions {
        return Ok(None);
    }
    Ok(Some(Arc::new(DatamuseClient::new(HttpConfig::from(config), DATAMUSE_SUG_URL)?)))
}

#[derive(Debug)]
pub struct SuggestionEngine {
    config: SuggestConfig,
    local: LocalWordList,
    remote: Option<Arc<dyn SuggestionSource>>,
    cache: Mutex<QueryCache>,
    current: Mutex<Option<CancelToken>>,
}

impl SuggestionEngine {
    pub fn new(config: SuggestConfig, local: LocalWordList, remote: Option<Arc<dyn SuggestionSource>>) -> Self {
        let cache = Mutex::new(QueryCache::new(config.cache_capacity));
        Self { config, local, remote, cache, current: Mutex::new(None) }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Local matches only, no network and no cache.
    pub fn local(&self, query: &str) -> Vec<String> {
        if query.trim().chars().count() < self.config.min_query_len {
            return Vec::new();
        }
        self.local.matches(query, self.config.max_results)
    }

    /// Suggestions for `query`, superseding any call still in flight.
    pub async fn suggest(&self, query: &str) -> Result<Suggestions, SuggestError> {
        let query = query.trim().to_string();
        let token = self.begin();

        if query.chars().count() < self.config.min_query_len {
            return Ok(Suggestions { query, words: Vec::new(), origin: SuggestionOrigin::Local });
        }

        if let Some(words) = self.cached(&query) {
            tracing::debug!("suggestion cache hit: {}", query);
            return Ok(Suggestions { query, words, origin: SuggestionOrigin::Cache });
        }

        let local = self.local.matches(&query, self.config.max_results);
        let remote = match &self.remote {
            Some(remote) if local.len() < self.config.enrich_threshold => Arc::clone(remote),
            _ => return Ok(Suggestions { query, words: local, origin: SuggestionOrigin::Local }),
        };

        let fetch = async {
            tokio::time::sleep(self.config.debounce).await;
            remote.suggest(&query, self.config.max_results).await
        };

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(SuggestError::Superseded),
            outcome = fetch => outcome,
        };

        if token.is_cancelled() {
            return Err(SuggestError::Superseded);
        }

        match outcome {
            Ok(remote_words) => {
                let words = merge(&local, &remote_words, self.config.max_results);
                self.cache.lock().unwrap_or_else(|e| e.into_inner()).insert(&query, words.clone());
                Ok(Suggestions { query, words, origin: SuggestionOrigin::Enriched })
            }
            Err(e) => {
                tracing::warn!("remote suggestions failed, using local matches: {}", e);
                Ok(Suggestions { query, words: local, origin: SuggestionOrigin::Local })
            }
        }
    }

    /// Cancel whatever request is in flight.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().unwrap_or_else(|e| e.into_inner()).take() {
            token.cancel();
        }
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn begin(&self) -> CancelToken {
        let token = CancelToken::new();
        let previous = self.current.lock().unwrap_or_else(|e| e.into_inner()).replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    fn cached(&self, query: &str) -> Option<Vec<String>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).get(query).map(<[String]>::to_vec)
    }
}
