use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("correct index {index} is out of range for {count} options")]
    CorrectOutOfRange { index: usize, count: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question as received from the quiz backend.
///
/// Only constructible through [`Question::new`], so every instance has at least
/// two options and a `correct_index` that points into them. Deserialization
/// goes through the same constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionFields")]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: Option<String>,
}

#[derive(Deserialize)]
struct QuestionFields {
    text: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explanation: Option<String>,
}

impl TryFrom<QuestionFields> for Question {
    type Error = QuestionError;

    fn try_from(fields: QuestionFields) -> Result<Self, Self::Error> {
        Question::new(
            fields.text,
            fields.options,
            fields.correct_index,
            fields.explanation,
        )
    }
}

impl Question {
    /// Build a validated question.
    ///
    /// Blank explanations are normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the trimmed text is empty.
    /// Returns `QuestionError::TooFewOptions` if fewer than two options are given.
    /// Returns `QuestionError::CorrectOutOfRange` if `correct_index` does not address an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                index: correct_index,
                count: options.len(),
            });
        }
        let explanation = explanation.filter(|value| !value.trim().is_empty());

        Ok(Self {
            text,
            options,
            correct_index,
            explanation,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_index)
    }
}
