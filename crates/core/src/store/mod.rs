//! SQLite-backed key-value store.
//!
//! A single flat table of string keys to JSON-encoded string values, accessed
//! through tokio-rusqlite. Every cache in this crate reads and writes whole
//! JSON blobs through it:
//!
//! - No transactions span a read-modify-write; the last writer wins
//! - Automatic schema migrations
//! - WAL mode

pub mod connection;
pub mod credentials;
pub mod kv;
pub mod migrations;

pub use crate::Error;

pub use connection::KvStore;

/// Dictionary cache: lowercased word -> cached lookup.
pub const DICTIONARY_CACHE_KEY: &str = "dictionary_cache";

/// Search history: newest-first list of searches.
pub const SEARCH_HISTORY_KEY: &str = "search_history";

/// Word-of-the-day cache: `YYYY-MM-DD` -> entry.
pub const WOTD_CACHE_KEY: &str = "wotd_cache";

/// Caller-supplied key for the generative fallback.
pub const GEMINI_API_KEY: &str = "gemini_api_key";
