//! Service wiring.

use std::sync::Arc;

use lexicon_core::{
    AppConfig, CacheStats, Clock, DictionaryCache, DictionaryCachePolicy, Error, KvStore, SearchHistory, WotdCache,
};

use crate::error::UpstreamError;
use crate::gemini::{AiSource, GEMINI_BASE_URL, GeminiClient};
use crate::http::HttpConfig;
use crate::lookup::LookupService;
use crate::suggest::{LocalWordList, SuggestConfig, SuggestionEngine};
use crate::wotd::WordOfTheDayService;

/// Everything a front end needs, sharing one store and one clock.
#[derive(Debug)]
pub struct Lexicon {
    pub lookup: LookupService,
    pub wotd: WordOfTheDayService,
    pub suggest: SuggestionEngine,
    pub store: KvStore,
}

impl Lexicon {
    pub fn new(lookup: LookupService, wotd: WordOfTheDayService, suggest: SuggestionEngine, store: KvStore) -> Self {
        Self { lookup, wotd, suggest, store }
    }

    /// Build every service with the upstream clients `config` selects.
    pub fn from_config(config: &AppConfig, store: KvStore, clock: Arc<dyn Clock>) -> Result<Self, UpstreamError> {
        let cache = DictionaryCache::new(store.clone(), Arc::clone(&clock), DictionaryCachePolicy::from(config));
        let history = SearchHistory::new(store.clone(), Arc::clone(&clock), config.history_max_entries);
        let ai: Arc<dyn AiSource> =
            Arc::new(GeminiClient::new(HttpConfig::from(config), GEMINI_BASE_URL, &config.gemini_model)?);
        let lookup = LookupService::new(
            cache,
            history,
            crate::dictionary::source_from_config(config)?,
            Some(ai),
            store.clone(),
            Arc::clone(&clock),
        );

        let wotd_cache = WotdCache::new(store.clone(), Arc::clone(&clock), config.wotd_retention_days);
        let wotd = WordOfTheDayService::new(wotd_cache, crate::wotd::sources_from_config(config)?, clock);

        let suggest = SuggestionEngine::new(
            SuggestConfig::from(config),
            LocalWordList::bundled(),
            crate::suggest::source_from_config(config)?,
        );

        Ok(Self::new(lookup, wotd, suggest, store))
    }

    /// Drop expired dictionary entries and word-of-the-day days outside the window.
    pub async fn maintain(&self) -> Result<(), Error> {
        let purged = self.lookup.cache().purge_expired().await?;
        let pruned = self.wotd.cache().prune().await?;
        tracing::info!(purged, pruned, "cache maintenance finished");
        Ok(())
    }

    pub async fn stats(&self) -> Result<CacheStats, Error> {
        self.store.cache_stats().await
    }

    /// Clear persisted caches and history, plus the in-memory suggestion cache.
    pub async fn clear_all(&self) -> Result<(), Error> {
        self.store.clear_all().await?;
        self.suggest.clear_cache();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_core::SystemClock;

    async fn make_lexicon() -> Lexicon {
        let store = KvStore::open_in_memory().await.unwrap();
        let config = AppConfig { remote_suggestions: false, ..Default::default() };
        Lexicon::from_config(&config, store, Arc::new(SystemClock)).unwrap()
    }

    #[tokio::test]
    async fn test_from_config_and_stats() {
        let lexicon = make_lexicon().await;
        lexicon.lookup.history().record("sonder", None).await.unwrap();

        let stats = lexicon.stats().await.unwrap();
        assert_eq!(stats.total_history, 1);
        assert_eq!(stats.total_words, 0);

        lexicon.clear_all().await.unwrap();
        assert_eq!(lexicon.stats().await.unwrap().total_history, 0);
    }

    #[tokio::test]
    async fn test_maintain_on_empty_store() {
        let lexicon = make_lexicon().await;
        lexicon.maintain().await.unwrap();
    }

    #[tokio::test]
    async fn test_local_suggestions_without_network() {
        let lexicon = make_lexicon().await;
        let result = lexicon.suggest.suggest("petri").await.unwrap();
        assert_eq!(result.words, vec!["petrichor".to_string()]);
    }
}
