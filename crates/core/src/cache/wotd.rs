//! Word-of-the-day cache.
//!
//! Holds at most one entry per local calendar date. Every write prunes dates
//! outside the trailing retention window (today included), so the cache never
//! holds more than `retention_days` entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::clock::{Clock, date_key};
use crate::config::MAX_WOTD_RETENTION_DAYS;
use crate::store::{KvStore, WOTD_CACHE_KEY};
use crate::types::WordOfTheDay;
use crate::Error;

type WotdMap = BTreeMap<String, WordOfTheDay>;

/// Date-keyed word-of-the-day cache stored under `wotd_cache`.
#[derive(Debug, Clone)]
pub struct WotdCache {
    store: KvStore,
    clock: Arc<dyn Clock>,
    retention_days: u32,
}

impl WotdCache {
    pub fn new(store: KvStore, clock: Arc<dyn Clock>, retention_days: u32) -> Self {
        Self { store, clock, retention_days: retention_days.clamp(1, MAX_WOTD_RETENTION_DAYS) }
    }

    /// Key for the current local date.
    pub fn today_key(&self) -> String {
        date_key(self.clock.today())
    }

    /// Today's cached entry, if any. Read failures are treated as a miss.
    pub async fn today(&self) -> Option<WordOfTheDay> {
        let key = self.today_key();
        match self.load().await {
            Ok(mut map) => map.remove(&key),
            Err(e) => {
                tracing::warn!("failed to read word-of-the-day cache: {}", e);
                None
            }
        }
    }

    /// Store `entry` as today's word and prune dates outside the window.
    ///
    /// Returns the entry as stored, with `cached_at` set.
    pub async fn store_today(&self, entry: WordOfTheDay) -> Result<WordOfTheDay, Error> {
        let mut map = self.load().await.unwrap_or_else(|e| {
            tracing::warn!("discarding unreadable word-of-the-day cache: {}", e);
            WotdMap::new()
        });

        let stored = WordOfTheDay { cached_at: Some(self.clock.now_millis()), ..entry };
        map.insert(self.today_key(), stored.clone());
        self.retain_window(&mut map);

        self.save(&map).await?;
        Ok(stored)
    }

    /// Drop entries outside the retention window. Returns the number removed.
    pub async fn prune(&self) -> Result<usize, Error> {
        let mut map = self.load().await?;
        let removed = self.retain_window(&mut map);
        if removed > 0 {
            self.save(&map).await?;
        }
        Ok(removed)
    }

    /// Number of dated entries; 0 when the cache cannot be read.
    pub async fn len(&self) -> usize {
        self.load().await.map(|m| m.len()).unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) -> Result<bool, Error> {
        self.store.remove(WOTD_CACHE_KEY).await
    }

    /// Date keys inside the window, newest first.
    pub fn window_keys(&self) -> Vec<String> {
        window_dates(self.clock.today(), self.retention_days)
            .into_iter()
            .map(date_key)
            .collect()
    }

    fn retain_window(&self, map: &mut WotdMap) -> usize {
        let keep = self.window_keys();
        let before = map.len();
        map.retain(|key, _| keep.contains(key));
        before - map.len()
    }

    async fn load(&self) -> Result<WotdMap, Error> {
        Ok(self.store.get_json(WOTD_CACHE_KEY).await?.unwrap_or_default())
    }

    async fn save(&self, map: &WotdMap) -> Result<(), Error> {
        self.store.set_json(WOTD_CACHE_KEY, map).await
    }
}

fn window_dates(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..i64::from(days)).map(|i| today - Duration::days(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::WotdSourceKind;
    use chrono::{Local, TimeZone};

    fn make_entry(word: &str) -> WordOfTheDay {
        WordOfTheDay {
            word: word.to_string(),
            definition: "a definition".to_string(),
            example: "an example".to_string(),
            part_of_speech: "noun".to_string(),
            source: WotdSourceKind::Fallback,
            cached_at: None,
        }
    }

    async fn make_cache() -> (WotdCache, Arc<ManualClock>) {
        let store = KvStore::open_in_memory().await.unwrap();
        let start = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap();
        let clock = Arc::new(ManualClock::new(start));
        (WotdCache::new(store, clock.clone(), 7), clock)
    }

    #[tokio::test]
    async fn test_store_and_read_today() {
        let (cache, _) = make_cache().await;
        assert!(cache.today().await.is_none());

        let stored = cache.store_today(make_entry("sonder")).await.unwrap();
        assert!(stored.cached_at.is_some());
        assert_eq!(cache.today().await, Some(stored));
    }

    #[tokio::test]
    async fn test_rollover_misses() {
        let (cache, clock) = make_cache().await;
        cache.store_today(make_entry("sonder")).await.unwrap();

        clock.advance(Duration::days(1));
        assert!(cache.today().await.is_none());
        assert_eq!(cache.today_key(), "2024-03-02");
    }

    #[tokio::test]
    async fn test_retains_at_most_seven_days() {
        let (cache, clock) = make_cache().await;
        for i in 0..10 {
            cache.store_today(make_entry(&format!("word{i}"))).await.unwrap();
            clock.advance(Duration::days(1));
        }
        assert_eq!(cache.len().await, 7);
    }

    #[tokio::test]
    async fn test_oversized_retention_is_clamped() {
        let store = KvStore::open_in_memory().await.unwrap();
        let start = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap();
        let cache = WotdCache::new(store, Arc::new(ManualClock::new(start)), u32::MAX);
        assert_eq!(cache.window_keys().len(), MAX_WOTD_RETENTION_DAYS as usize);
    }

    #[tokio::test]
    async fn test_window_crosses_month_boundary() {
        let (cache, _) = make_cache().await;
        let keys = cache.window_keys();
        assert_eq!(keys.len(), 7);
        assert_eq!(keys[0], "2024-03-01");
        assert_eq!(keys[1], "2024-02-29");
        assert_eq!(keys[6], "2024-02-24");
    }

    #[tokio::test]
    async fn test_prune_after_time_passes() {
        let (cache, clock) = make_cache().await;
        cache.store_today(make_entry("sonder")).await.unwrap();
        clock.advance(Duration::days(7));

        assert_eq!(cache.prune().await.unwrap(), 1);
        assert!(cache.is_empty().await);
    }
}
