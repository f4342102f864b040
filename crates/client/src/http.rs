//! Shared HTTP client settings.

use std::sync::Arc;
use std::time::Duration;

use lexicon_core::AppConfig;
use url::Url;

use crate::error::UpstreamError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = "lexicon/0.1";

/// Settings every upstream client is built with.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { user_agent: DEFAULT_USER_AGENT.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl From<&AppConfig> for HttpConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout() }
    }
}

impl HttpConfig {
    pub(crate) fn build(&self) -> Result<reqwest::Client, UpstreamError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| UpstreamError::Network(Arc::new(e)))
    }
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn join_segments(base: &str, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(base).map_err(|e| UpstreamError::InvalidRequest(format!("bad base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| UpstreamError::InvalidRequest(format!("base URL cannot have a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
