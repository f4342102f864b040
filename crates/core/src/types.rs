//! Canonical data types shared by every cache and upstream client.
//!
//! All persisted shapes serialize with camelCase field names so a stored blob
//! reads the same regardless of which upstream produced it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized dictionary lookup result.
///
/// Produced by mapping one upstream response into this shape. Immutable once
/// cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<Pronunciation>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    pub source: DictionarySourceKind,
    /// Epoch milliseconds at normalization time.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pronunciation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Definitions grouped under a single part of speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
}

/// Which dictionary upstream produced a [`LookupResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DictionarySourceKind {
    #[serde(rename = "dictionaryapi")]
    DictionaryApi,
    #[serde(rename = "wordsapi")]
    WordsApi,
}

impl DictionarySourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DictionarySourceKind::DictionaryApi => "dictionaryapi",
            DictionarySourceKind::WordsApi => "wordsapi",
        }
    }
}

/// Free-text definition returned by the generative fallback.
///
/// The content is opaque: it is stored and displayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiDefinition {
    pub word: String,
    pub content: String,
    pub model: String,
    pub timestamp: i64,
}

/// Word of the day, normalized from whichever source answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordOfTheDay {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub part_of_speech: String,
    pub source: WotdSourceKind,
    /// Epoch milliseconds when the entry was written to the cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WotdSourceKind {
    #[serde(rename = "wotd.site")]
    WotdSite,
    #[serde(rename = "wordnik")]
    Wordnik,
    #[serde(rename = "fallback")]
    Fallback,
}
