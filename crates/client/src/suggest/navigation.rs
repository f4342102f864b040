//! Suggestion box state machine.
//!
//! ```text
//! Hidden ──show_local──▶ Visible { enriched: false } (+ loading)
//!                              │ show_enriched
//!                              ▼
//!                        Visible { enriched: true }
//!
//! any ──select / Enter / Escape / blur / short query──▶ Hidden
//! ```
//!
//! The selection is a bounded index walk: ArrowDown stops at the last item,
//! ArrowUp from the first item clears the selection.

use serde::Serialize;

/// Visibility of the suggestion box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum BoxPhase {
    Hidden,
    Visible { enriched: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not consumed; the caller should handle the key itself.
    Ignored,
    Handled,
    /// Enter on a selected suggestion.
    Selected(String),
}

#[derive(Debug, Clone)]
pub struct SuggestionBox {
    phase: BoxPhase,
    query: String,
    items: Vec<String>,
    selected: Option<usize>,
    loading: bool,
    min_query_len: usize,
}

impl Default for SuggestionBox {
    fn default() -> Self {
        Self::new(2)
    }
}

impl SuggestionBox {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            phase: BoxPhase::Hidden,
            query: String::new(),
            items: Vec::new(),
            selected: None,
            loading: false,
            min_query_len,
        }
    }

    pub fn phase(&self) -> BoxPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, BoxPhase::Visible { .. })
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_word(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    /// Track the input text. Returns false (and hides) when the query is too
    /// short to suggest for.
    pub fn query_changed(&mut self, query: &str) -> bool {
        self.query = query.trim().to_string();
        if self.query.chars().count() < self.min_query_len {
            self.hide();
            return false;
        }
        true
    }

    /// Show local matches immediately. `loading` marks a pending remote request.
    pub fn show_local(&mut self, query: &str, words: Vec<String>, loading: bool) {
        self.query = query.trim().to_string();
        self.items = words;
        self.selected = None;
        self.loading = loading;
        self.phase = if self.items.is_empty() && !loading {
            BoxPhase::Hidden
        } else {
            BoxPhase::Visible { enriched: false }
        };
    }

    /// Replace the list with merged results. Results for any query other than
    /// the current one are stale and dropped; returns whether they were applied.
    pub fn show_enriched(&mut self, query: &str, words: Vec<String>) -> bool {
        if query.trim().to_lowercase() != self.query.to_lowercase() {
            tracing::debug!(stale = %query, current = %self.query, "dropping stale suggestions");
            return false;
        }
        self.loading = false;
        self.items = words;
        self.selected = self.selected.filter(|&i| i < self.items.len());
        self.phase = if self.items.is_empty() { BoxPhase::Hidden } else { BoxPhase::Visible { enriched: true } };
        true
    }

    /// Remote enrichment ended without new results.
    pub fn finish_loading(&mut self) {
        self.loading = false;
        if self.items.is_empty() {
            self.hide();
        }
    }

    pub fn on_key(&mut self, key: NavKey) -> KeyOutcome {
        if !self.is_visible() || self.items.is_empty() {
            return KeyOutcome::Ignored;
        }

        match key {
            NavKey::ArrowDown => {
                let last = self.items.len() - 1;
                self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                KeyOutcome::Handled
            }
            NavKey::ArrowUp => {
                self.selected = self.selected.and_then(|i| i.checked_sub(1));
                KeyOutcome::Handled
            }
            NavKey::Enter => match self.selected {
                Some(i) => self.select(i).map_or(KeyOutcome::Ignored, KeyOutcome::Selected),
                None => KeyOutcome::Ignored,
            },
            NavKey::Escape => {
                self.hide();
                KeyOutcome::Handled
            }
        }
    }

    /// Pick the suggestion at `index` and hide the box.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let word = self.items.get(index).cloned()?;
        self.hide();
        Some(word)
    }

    pub fn blur(&mut self) {
        self.hide();
    }

    pub fn hide(&mut self) {
        self.phase = BoxPhase::Hidden;
        self.selected = None;
        self.loading = false;
    }
}
