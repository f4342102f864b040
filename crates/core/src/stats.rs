//! Cache statistics and bulk clearing.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::{DICTIONARY_CACHE_KEY, KvStore, SEARCH_HISTORY_KEY, WOTD_CACHE_KEY};
use crate::Error;

/// Summary of what the store currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_words: usize,
    pub total_history: usize,
    /// Serialized dictionary and word-of-the-day caches, in KiB (rounded).
    pub cache_size_kb: usize,
}

impl KvStore {
    /// Count cached words and history entries and measure cache size.
    ///
    /// Unreadable blobs count as empty.
    pub async fn cache_stats(&self) -> Result<CacheStats, Error> {
        let total_words = self
            .get_json::<HashMap<String, serde_json::Value>>(DICTIONARY_CACHE_KEY)
            .await
            .unwrap_or_default()
            .map(|m| m.len())
            .unwrap_or(0);
        let total_history = self
            .get_json::<Vec<serde_json::Value>>(SEARCH_HISTORY_KEY)
            .await
            .unwrap_or_default()
            .map(|v| v.len())
            .unwrap_or(0);

        let bytes = self.value_len(DICTIONARY_CACHE_KEY).await? + self.value_len(WOTD_CACHE_KEY).await?;
        let cache_size_kb = (bytes as f64 / 1024.0).round() as usize;

        Ok(CacheStats { total_words, total_history, cache_size_kb })
    }

    /// Remove cached definitions, history and words of the day.
    ///
    /// The stored API key is kept.
    pub async fn clear_all(&self) -> Result<(), Error> {
        for key in [DICTIONARY_CACHE_KEY, SEARCH_HISTORY_KEY, WOTD_CACHE_KEY] {
            self.remove(key).await?;
        }
        tracing::info!("cleared dictionary cache, search history and word-of-the-day cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GEMINI_API_KEY;

    #[tokio::test]
    async fn test_empty_stats() {
        let store = KvStore::open_in_memory().await.unwrap();
        let stats = store.cache_stats().await.unwrap();
        assert_eq!(stats, CacheStats { total_words: 0, total_history: 0, cache_size_kb: 0 });
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let store = KvStore::open_in_memory().await.unwrap();
        let big = "x".repeat(3000);
        store
            .set_raw(DICTIONARY_CACHE_KEY, &format!(r#"{{"a":{{"v":"{big}"}},"b":{{}}}}"#))
            .await
            .unwrap();
        store.set_raw(SEARCH_HISTORY_KEY, "[{},{},{}]").await.unwrap();

        let stats = store.cache_stats().await.unwrap();
        assert_eq!(stats.total_words, 2);
        assert_eq!(stats.total_history, 3);
        assert_eq!(stats.cache_size_kb, 3);
    }

    #[tokio::test]
    async fn test_clear_keeps_api_key() {
        let store = KvStore::open_in_memory().await.unwrap();
        store.set_raw(DICTIONARY_CACHE_KEY, "{}").await.unwrap();
        store.set_raw(SEARCH_HISTORY_KEY, "[]").await.unwrap();
        store.set_raw(WOTD_CACHE_KEY, "{}").await.unwrap();
        store.set_gemini_api_key("secret").await.unwrap();

        store.clear_all().await.unwrap();

        assert!(store.get_raw(DICTIONARY_CACHE_KEY).await.unwrap().is_none());
        assert!(store.get_raw(SEARCH_HISTORY_KEY).await.unwrap().is_none());
        assert!(store.get_raw(WOTD_CACHE_KEY).await.unwrap().is_none());
        assert!(store.get_raw(GEMINI_API_KEY).await.unwrap().is_some());
    }
}
