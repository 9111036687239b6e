use serde::{Deserialize, Serialize};

/// Per-question answer slot.
///
/// Created unanswered when a quiz is loaded and only mutated while its
/// question is the active one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    selected: Option<usize>,
    hint_revealed: bool,
    eliminated: Option<usize>,
}

impl AnswerRecord {
    #[must_use]
    pub fn unanswered() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    /// Option index the hint revealed as wrong, if any.
    #[must_use]
    pub fn eliminated(&self) -> Option<usize> {
        self.eliminated
    }

    pub(crate) fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub(crate) fn reveal_hint(&mut self, eliminated: Option<usize>) {
        self.hint_revealed = true;
        self.eliminated = eliminated;
    }
}
