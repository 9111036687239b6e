//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL must use http or https, got {scheme}")]
    UnsupportedScheme { scheme: String },
}

/// Errors emitted by quiz backends (`QuizSource`, `ScoreSink`, `LeaderboardSource`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The backend answered non-2xx with an `{error}` body meant for the player.
    #[error("{message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("No questions generated. Try a different topic or lower difficulty.")]
    NoQuestions,
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizSessionService::save_score`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SaveScoreError {
    #[error("the quiz is not finished yet")]
    NotFinished,
    #[error("Please enter your name to save score")]
    MissingUsername,
    #[error("Could not save your score. Please try again.")]
    Failed(#[source] ApiError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error("Could not load the leaderboard.")]
    Load(#[source] ApiError),
    #[error("Failed to clear leaderboard.")]
    Clear(#[source] ApiError),
}

/// Errors emitted by `UploadService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    #[error("Please choose a document to upload.")]
    NoFile,
    #[error("The selected document is empty.")]
    EmptyFile,
    #[error("Failed to generate quiz: {0}")]
    Failed(#[source] ApiError),
}
