//! Dictionary lookup cache.
//!
//! Maps a lowercased word to its normalized lookup result and the time it was
//! cached. Entries older than the TTL are dropped on access; once the cache
//! grows past `max_entries` it is cut back to the `trim_to` most recently
//! cached entries.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::normalize_key;
use crate::clock::Clock;
use crate::config::{AppConfig, MAX_DICTIONARY_TTL_DAYS};
use crate::store::{DICTIONARY_CACHE_KEY, KvStore};
use crate::types::LookupResult;
use crate::Error;

/// A cached lookup and when it was written, in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: LookupResult,
    pub timestamp: i64,
}

type CacheMap = BTreeMap<String, CacheEntry>;

/// Expiry and size limits for [`DictionaryCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryCachePolicy {
    pub ttl: Duration,
    pub max_entries: usize,
    pub trim_to: usize,
}

impl Default for DictionaryCachePolicy {
    fn default() -> Self {
        Self { ttl: Duration::days(365), max_entries: 100, trim_to: 80 }
    }
}

impl From<&AppConfig> for DictionaryCachePolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            ttl: Duration::days(config.dictionary_ttl_days.clamp(1, MAX_DICTIONARY_TTL_DAYS)),
            max_entries: config.dictionary_max_entries,
            trim_to: config.dictionary_trim_to,
        }
    }
}

/// Word lookup cache stored under `dictionary_cache`.
#[derive(Debug, Clone)]
pub struct DictionaryCache {
    store: KvStore,
    clock: Arc<dyn Clock>,
    policy: DictionaryCachePolicy,
}

impl DictionaryCache {
    pub fn new(store: KvStore, clock: Arc<dyn Clock>, policy: DictionaryCachePolicy) -> Self {
        Self { store, clock, policy }
    }

    pub fn policy(&self) -> &DictionaryCachePolicy {
        &self.policy
    }

    /// Cached result for `word`, if present and not expired.
    ///
    /// An expired entry is deleted before returning `None`. Storage and parse
    /// failures are logged and treated as a miss.
    pub async fn get(&self, word: &str) -> Option<LookupResult> {
        let key = normalize_key(word);
        let mut map = match self.load().await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("failed to read dictionary cache: {}", e);
                return None;
            }
        };

        let timestamp = map.get(&key)?.timestamp;
        if self.is_expired(timestamp) {
            tracing::debug!(word = %key, "dictionary cache entry expired");
            map.remove(&key);
            if let Err(e) = self.save(&map).await {
                tracing::warn!("failed to remove expired cache entry: {}", e);
            }
            return None;
        }

        map.remove(&key).map(|entry| entry.data)
    }

    /// Cache `result` under `word` with the current time.
    ///
    /// Unreadable cache contents are discarded and replaced.
    pub async fn put(&self, word: &str, result: &LookupResult) -> Result<(), Error> {
        let key = normalize_key(word);
        let mut map = self.load().await.unwrap_or_else(|e| {
            tracing::warn!("discarding unreadable dictionary cache: {}", e);
            CacheMap::new()
        });

        map.insert(key, CacheEntry { data: result.clone(), timestamp: self.clock.now_millis() });

        if map.len() > self.policy.max_entries {
            map = self.trim(map);
        }

        self.save(&map).await
    }

    /// Remove every expired entry. Returns the number removed.
    pub async fn purge_expired(&self) -> Result<usize, Error> {
        let mut map = self.load().await?;
        let before = map.len();
        map.retain(|_, entry| !self.is_expired(entry.timestamp));
        let removed = before - map.len();
        if removed > 0 {
            self.save(&map).await?;
        }
        Ok(removed)
    }

    /// Number of cached words; 0 when the cache cannot be read.
    pub async fn len(&self) -> usize {
        self.load().await.map(|m| m.len()).unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) -> Result<bool, Error> {
        self.store.remove(DICTIONARY_CACHE_KEY).await
    }

    fn is_expired(&self, timestamp: i64) -> bool {
        self.clock.now_millis() - timestamp > self.policy.ttl.num_milliseconds()
    }

    /// Keep only the `trim_to` newest entries.
    fn trim(&self, map: CacheMap) -> CacheMap {
        let before = map.len();
        let mut entries: Vec<(String, CacheEntry)> = map.into_iter().collect();
        entries.sort_by_key(|(_, entry)| Reverse(entry.timestamp));
        entries.truncate(self.policy.trim_to);
        tracing::debug!(before, after = entries.len(), "trimmed dictionary cache");
        entries.into_iter().collect()
    }

    async fn load(&self) -> Result<CacheMap, Error> {
        Ok(self.store.get_json(DICTIONARY_CACHE_KEY).await?.unwrap_or_default())
    }

    async fn save(&self, map: &CacheMap) -> Result<(), Error> {
        self.store.set_json(DICTIONARY_CACHE_KEY, map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{Definition, DictionarySourceKind, Meaning};
    use chrono::{Local, TimeZone};

    fn make_result(word: &str) -> LookupResult {
        LookupResult {
            word: word.to_string(),
            pronunciation: None,
            meanings: vec![Meaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![Definition {
                    definition: format!("definition of {word}"),
                    example: None,
                    synonyms: vec![],
                    antonyms: vec![],
                }],
            }],
            source: DictionarySourceKind::DictionaryApi,
            timestamp: 0,
        }
    }

    async fn make_cache() -> (DictionaryCache, Arc<ManualClock>) {
        let store = KvStore::open_in_memory().await.unwrap();
        let start = Local.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).single().unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = DictionaryCache::new(store, clock.clone(), DictionaryCachePolicy::default());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (cache, _) = make_cache().await;
        let result = make_result("ephemeral");
        cache.put("Ephemeral", &result).await.unwrap();

        assert_eq!(cache.get("ephemeral").await, Some(result.clone()));
        assert_eq!(cache.get("  EPHEMERAL ").await, Some(result));
    }

    #[test]
    fn test_policy_from_config_clamps_ttl() {
        let config = AppConfig { dictionary_ttl_days: 1_000_000_000_000, ..Default::default() };
        let policy = DictionaryCachePolicy::from(&config);
        assert_eq!(policy.ttl, Duration::days(MAX_DICTIONARY_TTL_DAYS));

        let policy = DictionaryCachePolicy::from(&AppConfig::default());
        assert_eq!(policy.ttl, Duration::days(AppConfig::default().dictionary_ttl_days));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let (cache, _) = make_cache().await;
        assert!(cache.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_purged_on_access() {
        let (cache, clock) = make_cache().await;
        cache.put("ephemeral", &make_result("ephemeral")).await.unwrap();

        clock.advance(Duration::days(365));
        assert!(cache.get("ephemeral").await.is_some(), "exactly TTL old is still valid");

        clock.advance(Duration::milliseconds(1));
        assert!(cache.get("ephemeral").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_overflow_keeps_most_recent() {
        let (cache, clock) = make_cache().await;
        for i in 0..101 {
            cache.put(&format!("word{i}"), &make_result(&format!("word{i}"))).await.unwrap();
            clock.advance(Duration::seconds(1));
        }

        assert_eq!(cache.len().await, 80);
        assert!(cache.get("word0").await.is_none());
        assert!(cache.get("word20").await.is_none());
        assert!(cache.get("word21").await.is_some());
        assert!(cache.get("word100").await.is_some());
    }

    #[tokio::test]
    async fn test_at_capacity_does_not_trim() {
        let (cache, clock) = make_cache().await;
        for i in 0..100 {
            cache.put(&format!("word{i}"), &make_result(&format!("word{i}"))).await.unwrap();
            clock.advance(Duration::seconds(1));
        }
        assert_eq!(cache.len().await, 100);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (cache, clock) = make_cache().await;
        cache.put("old", &make_result("old")).await.unwrap();
        clock.advance(Duration::days(200));
        cache.put("new", &make_result("new")).await.unwrap();
        clock.advance(Duration::days(200));

        assert_eq!(cache.purge_expired().await.unwrap(), 1);
        assert!(cache.get("new").await.is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_a_miss_and_recovers() {
        let (cache, _) = make_cache().await;
        cache.store.set_raw(DICTIONARY_CACHE_KEY, "{broken").await.unwrap();

        assert!(cache.get("ephemeral").await.is_none());
        assert_eq!(cache.len().await, 0);

        cache.put("ephemeral", &make_result("ephemeral")).await.unwrap();
        assert!(cache.get("ephemeral").await.is_some());
    }

    #[tokio::test]
    async fn test_clear() {
        let (cache, _) = make_cache().await;
        cache.put("ephemeral", &make_result("ephemeral")).await.unwrap();
        assert!(cache.clear().await.unwrap());
        assert!(cache.is_empty().await);
    }
}
