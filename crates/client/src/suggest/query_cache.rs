//! In-memory suggestion cache.
//!
//! ```text
//! QueryCache
//!     ├── entries: HashMap<query, words>
//!     └── order: VecDeque<query>   // insertion order, oldest at the front
//! ```
//!
//! Eviction is by insertion order, not recency of use. Overwriting a query
//! keeps its original position.

use std::collections::{HashMap, VecDeque};

/// Default number of queries kept.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct QueryCache {
    capacity: usize,
    entries: HashMap<String, Vec<String>>,
    order: VecDeque<String>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, entries: HashMap::with_capacity(capacity), order: VecDeque::with_capacity(capacity) }
    }

    /// Cached words for `query`, matched case-insensitively.
    pub fn get(&self, query: &str) -> Option<&[String]> {
        self.entries.get(&query.to_lowercase()).map(Vec::as_slice)
    }

    pub fn insert(&mut self, query: &str, words: Vec<String>) {
        let key = query.to_lowercase();
        if self.entries.insert(key.clone(), words).is_some() {
            return;
        }

        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                tracing::trace!(query = %oldest, "evicting suggestion cache entry");
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
