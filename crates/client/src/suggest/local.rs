//! Bundled local word list.

const BUNDLED_WORDS: &str = include_str!("../../data/words.txt");

/// An ordered, lowercased word list searched without network access.
#[derive(Debug, Clone, Default)]
pub struct LocalWordList {
    words: Vec<String>,
}

impl LocalWordList {
    /// Parse a newline-separated list. Blank lines and `#` comments are skipped,
    /// duplicates keep their first position.
    pub fn from_text(text: &str) -> Self {
        let mut words: Vec<String> = Vec::new();
        for line in text.lines() {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            let word = word.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        Self { words }
    }

    /// The list shipped with the crate.
    pub fn bundled() -> Self {
        Self::from_text(BUNDLED_WORDS)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Prefix matches first, then substring matches, each in list order.
    pub fn matches(&self, query: &str, max: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || max == 0 {
            return Vec::new();
        }

        let prefix = self.words.iter().filter(|w| w.starts_with(&needle));
        let infix = self.words.iter().filter(|w| !w.starts_with(&needle) && w.contains(&needle));
        prefix.chain(infix).take(max).cloned().collect()
    }
}
