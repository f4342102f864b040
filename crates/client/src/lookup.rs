//! Dictionary lookup with caching and history.
//!
//! `search` consults the dictionary cache, then the configured upstream. Every
//! attempt lands in the search history, including misses. Storage failures are
//! logged and never fail a lookup.

use std::sync::Arc;

use lexicon_core::error::TRY_AGAIN_MESSAGE;
use lexicon_core::{
    AiDefinition, Clock, DictionaryCache, Error, HistoryEntry, HistoryPayload, KvStore, LookupResult, SearchHistory,
};
use serde::Serialize;

use crate::dictionary::DictionarySource;
use crate::error::UpstreamError;
use crate::gemini::AiSource;

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    pub result: LookupResult,
    pub from_cache: bool,
}

#[derive(Debug, Clone)]
pub struct LookupService {
    cache: DictionaryCache,
    history: SearchHistory,
    source: Arc<dyn DictionarySource>,
    ai: Option<Arc<dyn AiSource>>,
    store: KvStore,
    clock: Arc<dyn Clock>,
}

impl LookupService {
    pub fn new(
        cache: DictionaryCache, history: SearchHistory, source: Arc<dyn DictionarySource>, ai: Option<Arc<dyn AiSource>>,
        store: KvStore, clock: Arc<dyn Clock>,
    ) -> Self {
        Self { cache, history, source, ai, store, clock }
    }

    pub fn cache(&self) -> &DictionaryCache {
        &self.cache
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Look up `word`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a blank word
    /// - [`Error::NotFound`] when the dictionary has no entry
    /// - [`Error::Network`] for any other upstream failure
    pub async fn search(&self, word: &str) -> Result<Lookup, Error> {
        let word = word.trim();
        if word.is_empty() {
            return Err(Error::InvalidInput("Please enter a word to search".into()));
        }

        if let Some(cached) = self.cache.get(word).await {
            tracing::debug!("dictionary cache hit: {}", word);
            self.remember(word, Some(HistoryPayload::Dictionary(cached.clone()))).await;
            return Ok(Lookup { result: cached, from_cache: true });
        }

        match self.source.lookup(word).await {
            Ok(entry) => {
                let result = entry.into_lookup(word, self.clock.now_millis());
                if let Err(e) = self.cache.put(word, &result).await {
                    tracing::warn!("failed to cache lookup for {}: {}", word, e);
                }
                self.remember(word, Some(HistoryPayload::Dictionary(result.clone()))).await;
                Ok(Lookup { result, from_cache: false })
            }
            Err(e) => {
                self.remember(word, None).await;
                if e.is_not_found() {
                    tracing::debug!("word not found upstream: {}", e);
                    Err(Error::NotFound(format!("\"{word}\" could not be found in the dictionary.")))
                } else {
                    tracing::warn!(source = self.source.kind().as_str(), "dictionary lookup failed: {}", e);
                    Err(Error::Network(TRY_AGAIN_MESSAGE.to_string()))
                }
            }
        }
    }

    /// Ask the generative model for a definition using the stored API key.
    pub async fn ai_search(&self, word: &str) -> Result<AiDefinition, Error> {
        let word = word.trim();
        if word.is_empty() {
            return Err(Error::InvalidInput("Please enter a word to search".into()));
        }

        let ai = self.ai.as_ref().ok_or_else(|| Error::AiFailed("no generative model is configured".into()))?;
        let api_key = self
            .store
            .gemini_api_key()
            .await
            .ok_or_else(|| Error::MissingApiKey("Store a Gemini API key with ai_key_set first".into()))?;

        let content = ai.define(word, &api_key).await.map_err(|e| match e {
            UpstreamError::MissingApiKey(msg) => Error::MissingApiKey(msg),
            UpstreamError::AuthError => Error::AiFailed("the Gemini API key was rejected".into()),
            other => Error::AiFailed(other.to_string()),
        })?;

        let definition = AiDefinition {
            word: word.to_string(),
            content,
            model: ai.model().to_string(),
            timestamp: self.clock.now_millis(),
        };
        self.remember(word, Some(HistoryPayload::Ai(definition.clone()))).await;
        Ok(definition)
    }

    /// A previous search, with its stored result, without touching the network.
    pub async fn from_history(&self, word: &str) -> Option<HistoryEntry> {
        self.history.find(word).await
    }

    async fn remember(&self, word: &str, payload: Option<HistoryPayload>) {
        if let Err(e) = self.history.record(word, payload).await {
            tracing::warn!("failed to record search history for {}: {}", word, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::response::{DictionaryApiDefinition, DictionaryApiMeaning};
    use crate::dictionary::{DictionaryApiEntry, UpstreamEntry};
    use async_trait::async_trait;
    use chrono::{Duration, Local, TimeZone};
    use lexicon_core::{DictionaryCachePolicy, DictionarySourceKind, ManualClock};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct MockDictionary {
        known: Vec<&'static str>,
        offline: bool,
        calls: AtomicUsize,
    }

    impl MockDictionary {
        fn knowing(known: &[&'static str]) -> Arc<Self> {
            Arc::new(Self { known: known.to_vec(), offline: false, calls: AtomicUsize::new(0) })
        }

        fn offline() -> Arc<Self> {
            Arc::new(Self { known: vec![], offline: true, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl DictionarySource for MockDictionary {
        fn kind(&self) -> DictionarySourceKind {
            DictionarySourceKind::DictionaryApi
        }

        async fn lookup(&self, word: &str) -> Result<UpstreamEntry, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(UpstreamError::Timeout);
            }
            if !self.known.contains(&word.to_lowercase().as_str()) {
                return Err(UpstreamError::NotFound(format!("\"{word}\" could not be found in Dictionary API.")));
            }
            Ok(UpstreamEntry::DictionaryApi(DictionaryApiEntry {
                word: word.to_lowercase(),
                phonetics: vec![],
                meanings: vec![DictionaryApiMeaning {
                    part_of_speech: "adjective".into(),
                    definitions: vec![DictionaryApiDefinition {
                        definition: "Lasting for a short period of time.".into(),
                        example: None,
                        synonyms: vec![],
                        antonyms: vec![],
                    }],
                }],
            }))
        }
    }

    #[derive(Debug)]
    struct MockAi;

    #[async_trait]
    impl AiSource for MockAi {
        fn model(&self) -> &str {
            "mock-model"
        }

        async fn define(&self, word: &str, api_key: &str) -> Result<String, UpstreamError> {
            match api_key {
                "bad" => Err(UpstreamError::AuthError),
                _ => Ok(format!("**{word}**: a made-up word")),
            }
        }
    }

    async fn make_service(source: Arc<MockDictionary>) -> (LookupService, Arc<ManualClock>) {
        let store = KvStore::open_in_memory().await.unwrap();
        let start = Local.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).single().unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = DictionaryCache::new(store.clone(), clock.clone(), DictionaryCachePolicy::default());
        let history = SearchHistory::new(store.clone(), clock.clone(), 500);
        let ai: Option<Arc<dyn AiSource>> = Some(Arc::new(MockAi));
        (LookupService::new(cache, history, source, ai, store, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_found_then_cached_then_missing() {
        let source = MockDictionary::knowing(&["ephemeral"]);
        let (service, _) = make_service(source.clone()).await;

        let first = service.search("  ephemeral ").await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.result.word, "ephemeral");
        assert_eq!(first.result.source, DictionarySourceKind::DictionaryApi);

        let second = service.search("Ephemeral").await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.result, first.result);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let missing = service.search("zzzxcv").await.unwrap_err();
        assert!(missing.is_not_found());
        assert_eq!(missing.user_message(), "\"zzzxcv\" could not be found in the dictionary.");

        let history = service.history().list().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].word, "zzzxcv");
        assert!(!history[0].found);
        assert_eq!(history[1].word, "ephemeral");
        assert_eq!(history[1].display_word, "Ephemeral");
        assert!(matches!(history[1].result, Some(HistoryPayload::Dictionary(_))));
    }

    #[tokio::test]
    async fn test_network_failure_is_generic() {
        let (service, _) = make_service(MockDictionary::offline()).await;
        let err = service.search("sonder").await.unwrap_err();
        assert!(matches!(&err, Error::Network(msg) if msg == TRY_AGAIN_MESSAGE));

        let entry = service.from_history("sonder").await.unwrap();
        assert!(!entry.found);
    }

    #[tokio::test]
    async fn test_blank_word_rejected() {
        let source = MockDictionary::knowing(&[]);
        let (service, _) = make_service(source.clone()).await;
        assert!(matches!(service.search("   ").await, Err(Error::InvalidInput(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(service.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let source = MockDictionary::knowing(&["ephemeral"]);
        let (service, clock) = make_service(source.clone()).await;

        service.search("ephemeral").await.unwrap();
        clock.advance(Duration::days(366));
        let again = service.search("ephemeral").await.unwrap();

        assert!(!again.from_cache);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_ai_search_requires_key() {
        let (service, _) = make_service(MockDictionary::knowing(&[])).await;
        assert!(matches!(service.ai_search("sonder").await, Err(Error::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn test_ai_search_records_history() {
        let (service, _) = make_service(MockDictionary::knowing(&[])).await;
        service.store.set_gemini_api_key("key").await.unwrap();

        let definition = service.ai_search("zzzxcv").await.unwrap();
        assert_eq!(definition.model, "mock-model");
        assert!(definition.content.contains("zzzxcv"));

        let entry = service.from_history("zzzxcv").await.unwrap();
        assert!(entry.found);
        assert_eq!(entry.result, Some(HistoryPayload::Ai(definition)));
    }

    #[tokio::test]
    async fn test_ai_search_rejected_key() {
        let (service, _) = make_service(MockDictionary::knowing(&[])).await;
        service.store.set_gemini_api_key("bad").await.unwrap();
        assert!(matches!(service.ai_search("sonder").await, Err(Error::AiFailed(_))));
        assert!(service.from_history("sonder").await.is_none());
    }
}
