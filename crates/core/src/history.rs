//! Search history log.
//!
//! A newest-first list of past searches, one entry per word. Recording a word
//! again moves it to the front with a fresh timestamp; the list is truncated to
//! `max_entries` after every write.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cache::normalize_key;
use crate::clock::Clock;
use crate::store::{KvStore, SEARCH_HISTORY_KEY};
use crate::types::{AiDefinition, LookupResult};
use crate::Error;

/// Result embedded in a history entry so re-selecting it needs no network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum HistoryPayload {
    Dictionary(LookupResult),
    Ai(AiDefinition),
}

/// One search attempt, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Lowercased word, the dedupe key.
    pub word: String,
    /// Word as the user typed it.
    pub display_word: String,
    pub timestamp: i64,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<HistoryPayload>,
}

/// Search history stored under `search_history`.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    store: KvStore,
    clock: Arc<dyn Clock>,
    max_entries: usize,
}

impl SearchHistory {
    pub fn new(store: KvStore, clock: Arc<dyn Clock>, max_entries: usize) -> Self {
        Self { store, clock, max_entries: max_entries.max(1) }
    }

    /// Record a search for `word`, replacing any earlier entry for it.
    ///
    /// `found` is true exactly when a payload is given.
    pub async fn record(&self, word: &str, payload: Option<HistoryPayload>) -> Result<HistoryEntry, Error> {
        let display_word = word.trim().to_string();
        let key = normalize_key(word);
        if key.is_empty() {
            return Err(Error::InvalidInput("cannot record an empty word".into()));
        }

        let mut entries = self.load().await.unwrap_or_else(|e| {
            tracing::warn!("discarding unreadable search history: {}", e);
            Vec::new()
        });

        entries.retain(|entry| entry.word.to_lowercase() != key);

        let entry = HistoryEntry {
            word: key,
            display_word,
            timestamp: self.clock.now_millis(),
            found: payload.is_some(),
            result: payload,
        };
        entries.insert(0, entry.clone());
        entries.truncate(self.max_entries);

        self.store.set_json(SEARCH_HISTORY_KEY, &entries).await?;
        Ok(entry)
    }

    /// All entries, newest first. Unreadable history is empty.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        self.load().await.unwrap_or_else(|e| {
            tracing::warn!("failed to read search history: {}", e);
            Vec::new()
        })
    }

    /// Entries whose display word contains `needle`, case-insensitively.
    pub async fn filter(&self, needle: &str) -> Vec<HistoryEntry> {
        let needle = needle.to_lowercase();
        self.list()
            .await
            .into_iter()
            .filter(|entry| entry.display_word.to_lowercase().contains(&needle))
            .collect()
    }

    /// The entry for `word`, if it was searched before.
    pub async fn find(&self, word: &str) -> Option<HistoryEntry> {
        let key = normalize_key(word);
        self.list().await.into_iter().find(|entry| entry.word == key)
    }

    pub async fn len(&self) -> usize {
        self.list().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) -> Result<bool, Error> {
        self.store.remove(SEARCH_HISTORY_KEY).await
    }

    async fn load(&self) -> Result<Vec<HistoryEntry>, Error> {
        Ok(self.store.get_json(SEARCH_HISTORY_KEY).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::DictionarySourceKind;
    use chrono::{Duration, Local, TimeZone};

    fn make_result(word: &str) -> LookupResult {
        LookupResult {
            word: word.to_string(),
            pronunciation: None,
            meanings: vec![],
            source: DictionarySourceKind::DictionaryApi,
            timestamp: 0,
        }
    }

    async fn make_history(max: usize) -> (SearchHistory, Arc<ManualClock>) {
        let store = KvStore::open_in_memory().await.unwrap();
        let start = Local.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).single().unwrap();
        let clock = Arc::new(ManualClock::new(start));
        (SearchHistory::new(store, clock.clone(), max), clock)
    }

    #[tokio::test]
    async fn test_record_dedupes_newest_first() {
        let (history, clock) = make_history(500).await;
        let first = history.record("Ephemeral", None).await.unwrap();
        clock.advance(Duration::seconds(5));
        history.record("petrichor", None).await.unwrap();
        clock.advance(Duration::seconds(5));
        let again = history
            .record("ephemeral", Some(HistoryPayload::Dictionary(make_result("ephemeral"))))
            .await
            .unwrap();

        let entries = history.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word, "ephemeral");
        assert_eq!(entries[0].display_word, "ephemeral");
        assert!(entries[0].found);
        assert!(again.timestamp > first.timestamp);
        assert_eq!(entries[1].word, "petrichor");
    }

    #[tokio::test]
    async fn test_not_found_entry() {
        let (history, _) = make_history(500).await;
        let entry = history.record("zzzxcv", None).await.unwrap();
        assert!(!entry.found);
        assert!(entry.result.is_none());
    }

    #[tokio::test]
    async fn test_truncates_to_max() {
        let (history, _) = make_history(5).await;
        for i in 0..8 {
            history.record(&format!("word{i}"), None).await.unwrap();
        }
        let entries = history.list().await;
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].word, "word7");
        assert_eq!(entries[4].word, "word3");
    }

    #[tokio::test]
    async fn test_filter_and_find() {
        let (history, _) = make_history(500).await;
        history.record("Serendipity", None).await.unwrap();
        history.record("sonder", None).await.unwrap();
        history.record("luminous", None).await.unwrap();

        let filtered = history.filter("ND").await;
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].word, "sonder");

        assert_eq!(history.find("SERENDIPITY").await.unwrap().display_word, "Serendipity");
        assert!(history.find("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_word_rejected() {
        let (history, _) = make_history(500).await;
        assert!(matches!(history.record("   ", None).await, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_payload_tagging() {
        let payload = HistoryPayload::Ai(AiDefinition {
            word: "sonder".into(),
            content: "text".into(),
            model: "gemini".into(),
            timestamp: 1,
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "ai");
        assert_eq!(json["data"]["word"], "sonder");
    }

    #[tokio::test]
    async fn test_corrupt_history_reads_empty() {
        let (history, _) = make_history(500).await;
        history.store.set_raw(SEARCH_HISTORY_KEY, "[{").await.unwrap();
        assert!(history.list().await.is_empty());
        history.record("sonder", None).await.unwrap();
        assert_eq!(history.len().await, 1);
    }
}
