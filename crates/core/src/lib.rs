//! Core types and shared functionality for lexicon.
//!
//! This crate provides:
//! - Key-value store with SQLite backend
//! - Dictionary, word-of-the-day and search history caches
//! - Canonical lookup types
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod stats;
pub mod store;
pub mod types;

pub use cache::{DictionaryCache, DictionaryCachePolicy, WotdCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, DictionaryProvider};
pub use error::Error;
pub use history::{HistoryEntry, HistoryPayload, SearchHistory};
pub use stats::CacheStats;
pub use store::KvStore;
pub use types::{
    AiDefinition, Definition, DictionarySourceKind, LookupResult, Meaning, Pronunciation, WordOfTheDay,
    WotdSourceKind,
};
