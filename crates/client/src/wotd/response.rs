//! Word-of-the-day payloads and normalization.
//!
//! The two upstreams disagree on shape; each gets its own type and a
//! [`WotdPayload`] variant, normalized through [`WotdPayload::normalize`].

use lexicon_core::{WordOfTheDay, WotdSourceKind};
use serde::Deserialize;

/// Response from `api.wotd.site/word`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WotdSitePayload {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
}

/// Response from Wordnik `wordOfTheDay`.
#[derive(Debug, Clone, Deserialize)]
pub struct WordnikPayload {
    pub word: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub definitions: Vec<WordnikDefinition>,
    #[serde(default)]
    pub examples: Vec<WordnikExample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordnikDefinition {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordnikExample {
    #[serde(default)]
    pub text: Option<String>,
}

/// A raw word-of-the-day answer, tagged by source.
#[derive(Debug, Clone)]
pub enum WotdPayload {
    WotdSite(WotdSitePayload),
    Wordnik(WordnikPayload),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl WotdPayload {
    pub fn normalize(self) -> WordOfTheDay {
        match self {
            WotdPayload::WotdSite(p) => WordOfTheDay {
                word: non_empty(p.word).unwrap_or_else(|| "explore".to_string()),
                definition: non_empty(p.definition).unwrap_or_else(|| "To investigate or travel through".to_string()),
                example: non_empty(p.example).unwrap_or_else(|| "Let's explore new vocabulary together".to_string()),
                part_of_speech: non_empty(p.part_of_speech).unwrap_or_else(|| "verb".to_string()),
                source: WotdSourceKind::WotdSite,
                cached_at: None,
            },
            WotdPayload::Wordnik(p) => {
                let first_definition = p.definitions.into_iter().next();
                let (definition_text, part_of_speech) = match first_definition {
                    Some(d) => (non_empty(d.text), non_empty(d.part_of_speech)),
                    None => (None, None),
                };
                let example = p.examples.into_iter().next().and_then(|e| non_empty(e.text));

                WordOfTheDay {
                    definition: definition_text
                        .or_else(|| non_empty(p.note))
                        .unwrap_or_else(|| "A fascinating word to explore today".to_string()),
                    example: example.unwrap_or_else(|| format!("Discover how to use \"{}\" in context", p.word)),
                    part_of_speech: part_of_speech.unwrap_or_else(|| "word".to_string()),
                    word: p.word,
                    source: WotdSourceKind::Wordnik,
                    cached_at: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wotd_site_full() {
        let json = r#"{"word": "limerence", "definition": "infatuation", "example": "ex", "part_of_speech": "noun"}"#;
        let payload: WotdSitePayload = serde_json::from_str(json).unwrap();
        let wotd = WotdPayload::WotdSite(payload).normalize();
        assert_eq!(wotd.word, "limerence");
        assert_eq!(wotd.part_of_speech, "noun");
        assert_eq!(wotd.source, WotdSourceKind::WotdSite);
    }

    #[test]
    fn test_wotd_site_defaults() {
        let wotd = WotdPayload::WotdSite(WotdSitePayload::default()).normalize();
        assert_eq!(wotd.word, "explore");
        assert_eq!(wotd.definition, "To investigate or travel through");
        assert_eq!(wotd.part_of_speech, "verb");
    }

    #[test]
    fn test_wordnik_full() {
        let json = r#"{
            "word": "quiddity",
            "note": "a note",
            "definitions": [{"text": "The essence of a thing.", "partOfSpeech": "noun"}],
            "examples": [{"text": "the quiddity of poetry"}]
        }"#;
        let payload: WordnikPayload = serde_json::from_str(json).unwrap();
        let wotd = WotdPayload::Wordnik(payload).normalize();
        assert_eq!(wotd.definition, "The essence of a thing.");
        assert_eq!(wotd.example, "the quiddity of poetry");
        assert_eq!(wotd.part_of_speech, "noun");
        assert_eq!(wotd.source, WotdSourceKind::Wordnik);
    }

    #[test]
    fn test_wordnik_falls_back_to_note() {
        let json = r#"{"word": "quiddity", "note": "a note"}"#;
        let payload: WordnikPayload = serde_json::from_str(json).unwrap();
        let wotd = WotdPayload::Wordnik(payload).normalize();
        assert_eq!(wotd.definition, "a note");
        assert_eq!(wotd.example, "Discover how to use \"quiddity\" in context");
        assert_eq!(wotd.part_of_speech, "word");
    }
}
