//! Caches layered over the key-value store.
//!
//! Each cache owns one store key and rewrites the whole JSON blob on every
//! change:
//!
//! - [`DictionaryCache`]: word lookups with a TTL and size-bounded trimming
//! - [`WotdCache`]: one word of the day per calendar date, rolling retention

pub mod dictionary;
pub mod wotd;

pub use crate::Error;

pub use dictionary::{CacheEntry, DictionaryCache, DictionaryCachePolicy};
pub use wotd::WotdCache;

/// Normalize a word into its cache key: trimmed and lowercased.
pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Ephemeral "), "ephemeral");
        assert_eq!(normalize_key("ÉCLAT"), "éclat");
    }
}
