use std::sync::Arc;

use crate::backend::{
    DocumentSource, HttpQuizApi, InMemoryBackend, LeaderboardSource, QuizSource, ScoreSink,
};
use crate::config::QuizApiConfig;
use crate::error::ApiError;
use crate::leaderboard_service::LeaderboardService;
use crate::quiz_session::QuizSessionService;
use crate::upload_service::UploadService;
use crate::Clock;

/// Assembles app-facing services over one backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_sessions: Arc<QuizSessionService>,
    leaderboard: Arc<LeaderboardService>,
    uploads: Arc<UploadService>,
}

impl AppServices {
    /// Build services talking to the HTTP backend at `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be created.
    pub fn new_http(config: QuizApiConfig, clock: Clock) -> Result<Self, ApiError> {
        let api = Arc::new(HttpQuizApi::new(config)?);
        Ok(Self::from_backend(clock, api.clone(), api.clone(), api.clone(), api))
    }

    /// Build services over an in-memory backend.
    #[must_use]
    pub fn in_memory(backend: &InMemoryBackend, clock: Clock) -> Self {
        Self::from_backend(
            clock,
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
        )
    }

    #[must_use]
    pub fn from_backend(
        clock: Clock,
        source: Arc<dyn QuizSource>,
        scores: Arc<dyn ScoreSink>,
        leaderboard: Arc<dyn LeaderboardSource>,
        documents: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            quiz_sessions: Arc::new(QuizSessionService::new(clock, source, scores)),
            leaderboard: Arc::new(LeaderboardService::new(leaderboard)),
            uploads: Arc::new(UploadService::new(documents)),
        }
    }

    #[must_use]
    pub fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_sessions)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn uploads(&self) -> Arc<UploadService> {
        Arc::clone(&self.uploads)
    }
}
