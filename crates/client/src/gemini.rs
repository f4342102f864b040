//! Generative AI fallback client (Google Gemini).
//!
//! Given a word and a caller-supplied API key, asks the model for a definition
//! and returns the text it produced. The content is treated as an opaque blob.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;
use crate::http::HttpConfig;

/// Default base URL for the Generative Language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Something that can produce a free-text definition.
#[async_trait]
pub trait AiSource: Send + Sync + std::fmt::Debug {
    /// Model identifier recorded alongside each definition.
    fn model(&self) -> &str;

    async fn define(&self, word: &str, api_key: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Raw `generateContent` response.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: HttpConfig, base_url: &str, model: &str) -> Result<Self, UpstreamError> {
        Ok(Self { http: config.build()?, base_url: base_url.to_string(), model: model.to_string() })
    }

    pub fn prompt(word: &str) -> String {
        format!(
            "Define the English word \"{word}\". Give its part of speech, pronunciation, each meaning with an \
             example sentence, synonyms, antonyms and a short etymology. If it is not a real word, say so and \
             suggest the closest real words."
        )
    }
}

#[async_trait]
impl AiSource for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn define(&self, word: &str, api_key: &str) -> Result<String, UpstreamError> {
        if api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey("Gemini API key is not set".into()));
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let prompt = Self::prompt(word);
        let body = GenerateRequest { contents: vec![RequestContent { parts: vec![RequestPart { text: &prompt }] }] };

        tracing::debug!("requesting AI definition: word={}, model={}", word, self.model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { UpstreamError::Timeout } else { UpstreamError::Network(Arc::new(e)) })?;

        let status = response.status();
        tracing::debug!("Gemini response status: {}", status);

        // An invalid key is reported as 400 with API_KEY_INVALID.
        if status == 400 || status == 401 || status == 403 {
            return Err(UpstreamError::AuthError);
        }
        if !status.is_success() {
            return Err(UpstreamError::from_status(status, "model not found"));
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)?;
        parsed.text().ok_or_else(|| UpstreamError::Parse("model returned no text".into()))
    }
}
