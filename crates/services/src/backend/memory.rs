use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use quizera_core::model::{Difficulty, LeaderboardEntry, Question, QuizSet, ScoreSubmission};

use super::{DocumentSource, LeaderboardSource, QuizSource, ScoreSink};
use crate::error::ApiError;

#[derive(Default)]
struct Inner {
    generated: Vec<Question>,
    pending: Vec<Question>,
    uploaded: Vec<Question>,
    entries: Vec<LeaderboardEntry>,
    generate_error: Option<String>,
    fail_scores: bool,
    requests: Vec<(String, Difficulty)>,
    uploads: Vec<String>,
}

/// In-memory backend for tests and offline prototyping.
///
/// Every topic gets the same configured question list; failures can be
/// switched on to exercise the error paths.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_generated(self, questions: Vec<Question>) -> Self {
        if let Ok(mut guard) = self.inner.lock() {
            guard.generated = questions;
        }
        self
    }

    #[must_use]
    pub fn with_pending(self, questions: Vec<Question>) -> Self {
        if let Ok(mut guard) = self.inner.lock() {
            guard.pending = questions;
        }
        self
    }

    /// Questions any uploaded document turns into; they become pending on upload.
    #[must_use]
    pub fn with_uploaded(self, questions: Vec<Question>) -> Self {
        if let Ok(mut guard) = self.inner.lock() {
            guard.uploaded = questions;
        }
        self
    }

    #[must_use]
    pub fn with_entries(self, entries: Vec<LeaderboardEntry>) -> Self {
        if let Ok(mut guard) = self.inner.lock() {
            guard.entries = entries;
        }
        self
    }

    /// Make `generate` answer non-2xx with this message until cleared.
    pub fn fail_generation(&self, message: Option<String>) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.generate_error = message;
        }
    }

    pub fn fail_score_saves(&self, fail: bool) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.fail_scores = fail;
        }
    }

    /// Topics and difficulties passed to `generate`, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, Difficulty)> {
        self.inner
            .lock()
            .map(|guard| guard.requests.clone())
            .unwrap_or_default()
    }

    /// File names passed to `upload_document`, oldest first.
    #[must_use]
    pub fn uploads(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|guard| guard.uploads.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.inner
            .lock()
            .map(|guard| guard.entries.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, ApiError> {
        self.inner
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl QuizSource for InMemoryBackend {
    async fn generate(&self, topic: &str, difficulty: Difficulty) -> Result<QuizSet, ApiError> {
        let mut guard = self.lock()?;
        guard.requests.push((topic.to_string(), difficulty));
        if let Some(message) = guard.generate_error.clone() {
            return Err(ApiError::Rejected {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message,
            });
        }
        QuizSet::new(guard.generated.clone()).map_err(|_| ApiError::NoQuestions)
    }

    async fn fetch_pending(&self) -> Result<QuizSet, ApiError> {
        let guard = self.lock()?;
        QuizSet::new(guard.pending.clone()).map_err(|_| ApiError::NoQuestions)
    }
}

#[async_trait]
impl DocumentSource for InMemoryBackend {
    async fn upload_document(&self, file_name: &str, _bytes: Vec<u8>) -> Result<QuizSet, ApiError> {
        let mut guard = self.lock()?;
        guard.uploads.push(file_name.to_string());
        let quiz = QuizSet::new(guard.uploaded.clone()).map_err(|_| ApiError::NoQuestions)?;
        guard.pending = guard.uploaded.clone();
        Ok(quiz)
    }
}

#[async_trait]
impl ScoreSink for InMemoryBackend {
    async fn record(&self, submission: &ScoreSubmission) -> Result<(), ApiError> {
        let mut guard = self.lock()?;
        if guard.fail_scores {
            return Err(ApiError::Unavailable("score service unavailable".into()));
        }
        guard.entries.push(LeaderboardEntry::from(submission.clone()));
        Ok(())
    }
}

#[async_trait]
impl LeaderboardSource for InMemoryBackend {
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let mut entries = self.lock()?.entries.clone();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(entries)
    }

    async fn clear(&self) -> Result<(), ApiError> {
        self.lock()?.entries.clear();
        Ok(())
    }
}
