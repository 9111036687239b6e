//! Contracts for the quiz backend plus the HTTP and in-memory implementations.

mod http;
mod memory;
pub mod wire;

use async_trait::async_trait;

use quizera_core::model::{Difficulty, LeaderboardEntry, QuizSet, ScoreSubmission};

use crate::error::ApiError;

pub use http::HttpQuizApi;
pub use memory::InMemoryBackend;

/// Produces question sets for a session.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Generate a fresh quiz for a typed topic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoQuestions` when nothing usable comes back, or the
    /// transport/status error otherwise.
    async fn generate(&self, topic: &str, difficulty: Difficulty) -> Result<QuizSet, ApiError>;

    /// Fetch the quiz generated earlier from an uploaded document.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSource::generate`].
    async fn fetch_pending(&self) -> Result<QuizSet, ApiError>;
}

/// Persists finished scores.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the score was not accepted.
    async fn record(&self, submission: &ScoreSubmission) -> Result<(), ApiError>;
}

/// Turns an uploaded document into the pending quiz.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Upload `bytes` as `file_name` and generate a quiz from its text.
    ///
    /// On success the quiz is also what [`QuizSource::fetch_pending`] returns
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoQuestions` when the document yields nothing usable,
    /// or the transport/status error otherwise.
    async fn upload_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<QuizSet, ApiError>;
}

/// Read/clear access to saved scores.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the list cannot be fetched.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the backend refuses to clear.
    async fn clear(&self) -> Result<(), ApiError>;
}
