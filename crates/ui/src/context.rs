use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use services::{LeaderboardService, QuizSessionService, UploadService};

pub trait UiApp: Send + Sync {
    /// Whether the app was opened to play the quiz generated from an upload.
    fn from_upload(&self) -> bool;

    fn quiz_sessions(&self) -> Arc<QuizSessionService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
    fn uploads(&self) -> Arc<UploadService>;
}

#[derive(Clone)]
pub struct AppContext {
    from_upload_configured: bool,
    from_upload_once: Arc<AtomicBool>,

    quiz_sessions: Arc<QuizSessionService>,
    leaderboard: Arc<LeaderboardService>,
    uploads: Arc<UploadService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let from_upload_configured = app.from_upload();

        Self {
            from_upload_configured,
            from_upload_once: Arc::new(AtomicBool::new(from_upload_configured)),
            quiz_sessions: app.quiz_sessions(),
            leaderboard: app.leaderboard(),
            uploads: app.uploads(),
        }
    }

    /// One-shot: true only for the first quiz view mounted after an upload launch,
    /// so "Play Again" goes back to the regular start view.
    #[must_use]
    pub fn take_from_upload(&self) -> bool {
        self.from_upload_once.swap(false, Ordering::AcqRel)
    }

    /// Arm the one-shot again so the next quiz view plays the uploaded quiz.
    pub fn request_from_upload(&self) {
        self.from_upload_once.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn from_upload_configured(&self) -> bool {
        self.from_upload_configured
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
