//! JSON shapes exchanged with the quiz backend and their normalization.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use quizera_core::model::{Difficulty, LeaderboardEntry, Question, QuestionError, QuizSet};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub(crate) struct GenerateTopicRequest<'a> {
    pub topic: &'a str,
    pub difficulty: Difficulty,
}

/// Question lists are kept as raw values so one malformed item cannot sink the batch.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionsResponse {
    #[serde(default)]
    pub questions: Option<Vec<Value>>,
}

/// Body of the document upload endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default, alias = "questions")]
    pub quiz: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// A question as the backend sends it.
///
/// `correct` is an index in one producer and the option text in another;
/// some payloads name the fields `answer` / `explanation` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WireQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, alias = "answer")]
    pub correct: Option<WireCorrect>,
    #[serde(default, alias = "explanation")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireCorrect {
    /// Any JSON number; `1` and `1.0` address the same option.
    Index(Number),
    Text(String),
}

impl WireCorrect {
    #[must_use]
    pub fn index(value: u64) -> Self {
        Self::Index(Number::from(value))
    }
}

fn number_as_index(number: &Number) -> Option<usize> {
    if let Some(value) = number.as_u64() {
        return usize::try_from(value).ok();
    }
    let value = number.as_f64()?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    // Integral and in range after the checks above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = value as usize;
    Some(index)
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireQuestionError {
    #[error("question is malformed: {0}")]
    Malformed(String),
    #[error("question has no correct answer")]
    MissingAnswer,
    #[error("correct answer {0:?} does not match any option")]
    UnknownAnswer(String),
    #[error(transparent)]
    Invalid(#[from] QuestionError),
}

/// Resolve the backend's `correct` field to an option index.
///
/// Indices must be in range. Text matches an option exactly, then
/// case-insensitively after trimming, then as a numeric index.
#[must_use]
pub fn resolve_correct(correct: &WireCorrect, options: &[String]) -> Option<usize> {
    match correct {
        WireCorrect::Index(number) => number_as_index(number).filter(|i| *i < options.len()),
        WireCorrect::Text(text) => {
            if let Some(idx) = options.iter().position(|opt| opt == text) {
                return Some(idx);
            }
            let wanted = text.trim().to_lowercase();
            if let Some(idx) = options
                .iter()
                .position(|opt| opt.trim().to_lowercase() == wanted)
            {
                return Some(idx);
            }
            wanted.parse::<usize>().ok().filter(|i| *i < options.len())
        }
    }
}

impl WireQuestion {
    /// Normalize into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `WireQuestionError` when the answer cannot be resolved or the
    /// question fails domain validation.
    pub fn into_question(self) -> Result<Question, WireQuestionError> {
        let correct = self.correct.as_ref().ok_or(WireQuestionError::MissingAnswer)?;
        let correct_index = resolve_correct(correct, &self.options).ok_or_else(|| {
            WireQuestionError::UnknownAnswer(match correct {
                WireCorrect::Index(number) => number.to_string(),
                WireCorrect::Text(text) => text.clone(),
            })
        })?;
        Ok(Question::new(
            self.question,
            self.options,
            correct_index,
            self.context,
        )?)
    }
}

/// Decode and normalize a batch of raw questions, dropping the unusable ones.
///
/// # Errors
///
/// Returns `ApiError::NoQuestions` when nothing usable remains.
pub fn quiz_from_wire(items: Vec<Value>) -> Result<QuizSet, ApiError> {
    let received = items.len();
    let mut usable = Vec::with_capacity(received);
    for (idx, item) in items.into_iter().enumerate() {
        let question = serde_json::from_value::<WireQuestion>(item)
            .map_err(|err| WireQuestionError::Malformed(err.to_string()))
            .and_then(WireQuestion::into_question);
        match question {
            Ok(question) => usable.push(question),
            Err(err) => warn!("dropping question {} of {received}: {err}", idx + 1),
        }
    }
    QuizSet::new(usable).map_err(|_| ApiError::NoQuestions)
}

/// Decode leaderboard rows one by one; rows that do not decode are skipped.
#[must_use]
pub fn entries_from_wire(rows: Vec<Value>) -> Vec<LeaderboardEntry> {
    let received = rows.len();
    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value::<LeaderboardEntry>(row) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping leaderboard row {} of {received}: {err}", idx + 1);
                None
            }
        })
        .collect()
}
