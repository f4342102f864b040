//! Static words used when every upstream fails.

use chrono::{Datelike, NaiveDate};
use lexicon_core::{WordOfTheDay, WotdSourceKind};

/// (word, definition, example, part of speech)
const FALLBACK_WORDS: &[(&str, &str, &str, &str)] = &[
    (
        "serendipity",
        "The occurrence and development of events by chance in a happy or beneficial way",
        "A fortunate stroke of serendipity brought them together",
        "noun",
    ),
    ("ephemeral", "Lasting for a very short time", "The beauty of cherry blossoms is ephemeral", "adjective"),
    (
        "petrichor",
        "A pleasant smell accompanying the first rain after a long period of dry weather",
        "The petrichor after the storm was refreshing",
        "noun",
    ),
    (
        "sonder",
        "The realization that each passerby has a life as vivid and complex as your own",
        "Walking through the busy street, she felt a moment of sonder",
        "noun",
    ),
    (
        "luminous",
        "Full of or shedding light; bright or shining",
        "The luminous moon lit up the entire garden",
        "adjective",
    ),
    (
        "resilience",
        "The ability to recover quickly from difficulties; toughness",
        "Her resilience helped her overcome every challenge",
        "noun",
    ),
    (
        "wanderlust",
        "A strong desire to travel and explore the world",
        "His wanderlust led him to visit over thirty countries",
        "noun",
    ),
];

/// Fallback word for `date`, chosen by day of month.
pub fn fallback_word(date: NaiveDate) -> WordOfTheDay {
    let (word, definition, example, part_of_speech) = FALLBACK_WORDS[date.day() as usize % FALLBACK_WORDS.len()];
    WordOfTheDay {
        word: word.to_string(),
        definition: definition.to_string(),
        example: example.to_string(),
        part_of_speech: part_of_speech.to_string(),
        source: WotdSourceKind::Fallback,
        cached_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_by_day_of_month() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        assert_eq!(fallback_word(day(7)).word, "serendipity");
        assert_eq!(fallback_word(day(1)).word, "ephemeral");
        assert_eq!(fallback_word(day(13)).word, "wanderlust");
        assert_eq!(fallback_word(day(14)).source, WotdSourceKind::Fallback);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert_eq!(fallback_word(date), fallback_word(date));
    }
}
