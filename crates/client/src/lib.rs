//! Client code for lexicon.
//!
//! This crate provides the upstream HTTP clients (dictionary, word of the
//! day, suggestions, generative definitions) and the services that put the
//! core caches in front of them.

pub mod context;
pub mod dictionary;
pub mod error;
pub mod gemini;
pub mod http;
pub mod lookup;
pub mod suggest;
pub mod wotd;

pub use context::Lexicon;
pub use dictionary::{DictionaryApiClient, DictionarySource, UpstreamEntry, WordsApiClient};
pub use error::UpstreamError;
pub use gemini::{AiSource, GeminiClient};
pub use http::HttpConfig;
pub use lookup::{Lookup, LookupService};
pub use suggest::{
    BoxPhase, CancelToken, KeyOutcome, NavKey, SuggestError, SuggestionBox, SuggestionEngine, SuggestionOrigin,
    SuggestionSource, Suggestions, merge,
};
pub use wotd::{WordOfTheDayService, WotdSource};
