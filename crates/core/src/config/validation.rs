//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::{AppConfig, DictionaryProvider};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

/// Longest accepted dictionary TTL, about a century.
pub const MAX_DICTIONARY_TTL_DAYS: i64 = 36_500;

/// Longest accepted word-of-the-day retention window.
pub const MAX_WOTD_RETENTION_DAYS: u32 = 366;

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for out-of-range values and
    /// `ConfigError::Missing` when Words API is selected without a key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.dictionary_ttl_days < 1 {
            return Err(invalid("dictionary_ttl_days", "must be at least 1 day"));
        }
        if self.dictionary_ttl_days > MAX_DICTIONARY_TTL_DAYS {
            return Err(invalid("dictionary_ttl_days", "must not exceed 36500 days"));
        }
        if self.dictionary_max_entries == 0 {
            return Err(invalid("dictionary_max_entries", "must be greater than 0"));
        }
        if self.dictionary_trim_to == 0 || self.dictionary_trim_to >= self.dictionary_max_entries {
            return Err(invalid("dictionary_trim_to", "must be between 1 and dictionary_max_entries - 1"));
        }

        if self.history_max_entries == 0 {
            return Err(invalid("history_max_entries", "must be greater than 0"));
        }

        if self.wotd_retention_days == 0 {
            return Err(invalid("wotd_retention_days", "must be at least 1 day"));
        }
        if self.wotd_retention_days > MAX_WOTD_RETENTION_DAYS {
            return Err(invalid("wotd_retention_days", "must not exceed 366 days"));
        }

        if self.suggest_max_results == 0 || self.suggest_max_results > 50 {
            return Err(invalid("suggest_max_results", "must be between 1 and 50"));
        }
        if self.suggest_cache_capacity == 0 {
            return Err(invalid("suggest_cache_capacity", "must be greater than 0"));
        }

        if self.dictionary_provider == DictionaryProvider::WordsApi {
            self.require_rapidapi_key()?;
        }

        if !self.remote_suggestions && self.suggest_enrich_threshold > 0 {
            tracing::debug!(
                threshold = self.suggest_enrich_threshold,
                "remote_suggestions disabled; suggest_enrich_threshold has no effect"
            );
        }

        Ok(())
    }
}
