//! Dictionary API response types and normalization.
//!
//! Each upstream has its own raw types. [`UpstreamEntry`] tags which one
//! answered, and [`UpstreamEntry::into_lookup`] maps it into the canonical
//! [`LookupResult`].

use lexicon_core::{Definition, DictionarySourceKind, LookupResult, Meaning, Pronunciation};
use serde::Deserialize;

/// One entry from the Free Dictionary API (`api.dictionaryapi.dev`).
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryApiEntry {
    pub word: String,
    #[serde(default)]
    pub phonetics: Vec<DictionaryApiPhonetic>,
    #[serde(default)]
    pub meanings: Vec<DictionaryApiMeaning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryApiPhonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryApiMeaning {
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<DictionaryApiDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryApiDefinition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Response from Words API (RapidAPI).
#[derive(Debug, Clone, Deserialize)]
pub struct WordsApiResponse {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub results: Vec<WordsApiResult>,
    #[serde(default)]
    pub pronunciation: Option<WordsApiPronunciation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordsApiResult {
    pub definition: String,
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Words API returns either `{"all": "..."}` or a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WordsApiPronunciation {
    Parts {
        #[serde(default)]
        all: Option<String>,
    },
    Plain(String),
}

impl WordsApiPronunciation {
    fn text(&self) -> Option<String> {
        match self {
            WordsApiPronunciation::Parts { all } => all.clone(),
            WordsApiPronunciation::Plain(text) => Some(text.clone()),
        }
    }
}

/// A raw lookup answer, tagged by the upstream that produced it.
#[derive(Debug, Clone)]
pub enum UpstreamEntry {
    DictionaryApi(DictionaryApiEntry),
    WordsApi(WordsApiResponse),
}

impl UpstreamEntry {
    pub fn kind(&self) -> DictionarySourceKind {
        match self {
            UpstreamEntry::DictionaryApi(_) => DictionarySourceKind::DictionaryApi,
            UpstreamEntry::WordsApi(_) => DictionarySourceKind::WordsApi,
        }
    }

    /// Normalize into the canonical shape, stamped with `timestamp`.
    ///
    /// `fallback_word` is used when the upstream omits the headword.
    pub fn into_lookup(self, fallback_word: &str, timestamp: i64) -> LookupResult {
        match self {
            UpstreamEntry::DictionaryApi(entry) => normalize_dictionary_api(entry, timestamp),
            UpstreamEntry::WordsApi(response) => normalize_words_api(response, fallback_word, timestamp),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn normalize_dictionary_api(entry: DictionaryApiEntry, timestamp: i64) -> LookupResult {
    let pronunciation = entry
        .phonetics
        .iter()
        .find(|p| p.text.as_deref().is_some_and(|t| !t.is_empty()))
        .or_else(|| entry.phonetics.first())
        .map(|p| Pronunciation { text: non_empty(p.text.clone()), audio: non_empty(p.audio.clone()) });

    let meanings = entry
        .meanings
        .into_iter()
        .map(|m| Meaning {
            part_of_speech: m.part_of_speech,
            definitions: m
                .definitions
                .into_iter()
                .map(|d| Definition {
                    definition: d.definition,
                    example: non_empty(d.example),
                    synonyms: d.synonyms,
                    antonyms: d.antonyms,
                })
                .collect(),
        })
        .collect();

    LookupResult {
        word: entry.word,
        pronunciation,
        meanings,
        source: DictionarySourceKind::DictionaryApi,
        timestamp,
    }
}

/// Group Words API results by part of speech, in first-seen order.
fn normalize_words_api(response: WordsApiResponse, fallback_word: &str, timestamp: i64) -> LookupResult {
    let mut meanings: Vec<Meaning> = Vec::new();

    for result in response.results {
        let part_of_speech = non_empty(result.part_of_speech).unwrap_or_else(|| "unknown".to_string());
        let definition = Definition {
            definition: result.definition,
            example: result.examples.into_iter().next(),
            synonyms: result.synonyms,
            antonyms: result.antonyms,
        };

        match meanings.iter_mut().find(|m| m.part_of_speech == part_of_speech) {
            Some(meaning) => meaning.definitions.push(definition),
            None => meanings.push(Meaning { part_of_speech, definitions: vec![definition] }),
        }
    }

    LookupResult {
        word: response.word.unwrap_or_else(|| fallback_word.to_string()),
        pronunciation: response
            .pronunciation
            .and_then(|p| non_empty(p.text()))
            .map(|text| Pronunciation { text: Some(text), audio: None }),
        meanings,
        source: DictionarySourceKind::WordsApi,
        timestamp,
    }
}
