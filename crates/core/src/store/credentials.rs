//! Stored API key for the generative fallback.

use super::{GEMINI_API_KEY, KvStore};
use crate::Error;

impl KvStore {
    /// The stored Gemini API key, if any.
    ///
    /// Read failures are logged and reported as no key.
    pub async fn gemini_api_key(&self) -> Option<String> {
        match self.get_json::<String>(GEMINI_API_KEY).await {
            Ok(key) => key.filter(|k| !k.trim().is_empty()),
            Err(e) => {
                tracing::warn!("failed to read stored API key: {}", e);
                None
            }
        }
    }

    pub async fn set_gemini_api_key(&self, key: &str) -> Result<(), Error> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidInput("API key cannot be empty".into()));
        }
        self.set_json(GEMINI_API_KEY, &key).await
    }

    pub async fn clear_gemini_api_key(&self) -> Result<bool, Error> {
        self.remove(GEMINI_API_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_key_lifecycle() {
        let store = KvStore::open_in_memory().await.unwrap();
        assert!(store.gemini_api_key().await.is_none());

        store.set_gemini_api_key("  secret  ").await.unwrap();
        assert_eq!(store.gemini_api_key().await.as_deref(), Some("secret"));

        assert!(store.clear_gemini_api_key().await.unwrap());
        assert!(store.gemini_api_key().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_api_key_rejected() {
        let store = KvStore::open_in_memory().await.unwrap();
        let result = store.set_gemini_api_key("   ").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_corrupt_api_key_reads_as_none() {
        let store = KvStore::open_in_memory().await.unwrap();
        store.set_raw(GEMINI_API_KEY, "not-json").await.unwrap();
        assert!(store.gemini_api_key().await.is_none());
    }
}
