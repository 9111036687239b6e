#![forbid(unsafe_code)]

pub mod app_services;
pub mod backend;
pub mod config;
pub mod error;
pub mod leaderboard_service;
pub mod quiz_session;
pub mod upload_service;

pub use quizera_core::Clock;

pub use app_services::AppServices;
pub use backend::{
    DocumentSource, HttpQuizApi, InMemoryBackend, LeaderboardSource, QuizSource, ScoreSink,
};
pub use config::{API_URL_ENV, DEFAULT_API_URL, QuizApiConfig};
pub use error::{ApiError, ConfigError, LeaderboardError, SaveScoreError, UploadError};
pub use leaderboard_service::{LeaderboardService, LeaderboardSnapshot};
pub use quiz_session::QuizSessionService;
pub use upload_service::UploadService;
