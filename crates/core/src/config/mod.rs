//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LEXICON_*)
//! 2. TOML config file (if LEXICON_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::{ConfigError, MAX_DICTIONARY_TTL_DAYS, MAX_WOTD_RETENTION_DAYS};

/// Which upstream answers dictionary lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryProvider {
    /// Free Dictionary API (no key required).
    #[default]
    DictionaryApi,
    /// Words API via RapidAPI (requires `rapidapi_key`).
    WordsApi,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LEXICON_*)
/// 2. TOML config file (if LEXICON_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite store.
    ///
    /// Set via LEXICON_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Dictionary upstream used for lookups.
    #[serde(default)]
    pub dictionary_provider: DictionaryProvider,

    /// RapidAPI key for Words API.
    ///
    /// Set via LEXICON_RAPIDAPI_KEY environment variable.
    #[serde(default)]
    pub rapidapi_key: Option<String>,

    /// RapidAPI host header for Words API.
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,

    /// Wordnik key for the backup word-of-the-day source.
    ///
    /// Set via LEXICON_WORDNIK_API_KEY environment variable. The backup source
    /// is skipped when unset.
    #[serde(default)]
    pub wordnik_api_key: Option<String>,

    /// Generative model used for AI definitions.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Days a cached lookup stays valid.
    #[serde(default = "default_dictionary_ttl_days")]
    pub dictionary_ttl_days: i64,

    /// Dictionary cache size that triggers trimming.
    #[serde(default = "default_dictionary_max_entries")]
    pub dictionary_max_entries: usize,

    /// Number of most recent entries kept after trimming.
    #[serde(default = "default_dictionary_trim_to")]
    pub dictionary_trim_to: usize,

    /// Maximum search history length.
    #[serde(default = "default_history_max_entries")]
    pub history_max_entries: usize,

    /// Calendar days of word-of-the-day entries to retain, today included.
    #[serde(default = "default_wotd_retention_days")]
    pub wotd_retention_days: u32,

    /// Minimum query length before suggestions are produced.
    #[serde(default = "default_suggest_min_query_len")]
    pub suggest_min_query_len: usize,

    /// Maximum suggestions returned per query.
    #[serde(default = "default_suggest_max_results")]
    pub suggest_max_results: usize,

    /// Local matches below this count trigger remote enrichment.
    #[serde(default = "default_suggest_enrich_threshold")]
    pub suggest_enrich_threshold: usize,

    /// Delay before a remote suggestion request is sent.
    #[serde(default = "default_suggest_debounce_ms")]
    pub suggest_debounce_ms: u64,

    /// Number of queries kept in the in-memory suggestion cache.
    #[serde(default = "default_suggest_cache_capacity")]
    pub suggest_cache_capacity: usize,

    /// Whether remote suggestions are consulted at all.
    #[serde(default = "default_true")]
    pub remote_suggestions: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./lexicon.sqlite")
}

fn default_user_agent() -> String {
    "lexicon/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_rapidapi_host() -> String {
    "wordsapiv1.p.rapidapi.com".into()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_dictionary_ttl_days() -> i64 {
    365
}

fn default_dictionary_max_entries() -> usize {
    100
}

fn default_dictionary_trim_to() -> usize {
    80
}

fn default_history_max_entries() -> usize {
    500
}

fn default_wotd_retention_days() -> u32 {
    7
}

fn default_suggest_min_query_len() -> usize {
    2
}

fn default_suggest_max_results() -> usize {
    6
}

fn default_suggest_enrich_threshold() -> usize {
    3
}

fn default_suggest_debounce_ms() -> u64 {
    250
}

fn default_suggest_cache_capacity() -> usize {
    100
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            dictionary_provider: DictionaryProvider::default(),
            rapidapi_key: None,
            rapidapi_host: default_rapidapi_host(),
            wordnik_api_key: None,
            gemini_model: default_gemini_model(),
            dictionary_ttl_days: default_dictionary_ttl_days(),
            dictionary_max_entries: default_dictionary_max_entries(),
            dictionary_trim_to: default_dictionary_trim_to(),
            history_max_entries: default_history_max_entries(),
            wotd_retention_days: default_wotd_retention_days(),
            suggest_min_query_len: default_suggest_min_query_len(),
            suggest_max_results: default_suggest_max_results(),
            suggest_enrich_threshold: default_suggest_enrich_threshold(),
            suggest_debounce_ms: default_suggest_debounce_ms(),
            suggest_cache_capacity: default_suggest_cache_capacity(),
            remote_suggestions: true,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn suggest_debounce(&self) -> Duration {
        Duration::from_millis(self.suggest_debounce_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed, or
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LEXICON_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LEXICON_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// RapidAPI key, required only when Words API is the provider.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_rapidapi_key(&self) -> Result<&str, ConfigError> {
        self.rapidapi_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "rapidapi_key".into(),
            hint: "Set LEXICON_RAPIDAPI_KEY environment variable".into(),
        })
    }
}
