use std::sync::Arc;

use log::{info, warn};

use quizera_core::model::ScoreSubmission;
use quizera_core::session::{
    EntryMode, McqSheet, Phase, QuizEvent, SessionState, StartRequest, TransitionError,
};

use crate::backend::{QuizSource, ScoreSink};
use crate::error::{ApiError, SaveScoreError};
use crate::Clock;

/// Shown when a topic quiz cannot be generated for a reason the backend did not explain.
pub const GENERATE_FALLBACK_MESSAGE: &str = "Failed to generate quiz. Try a different topic.";
/// Shown when an upload session has no questions waiting.
pub const UPLOAD_EMPTY_MESSAGE: &str = "No quiz questions found from upload.";
/// Shown when the pending upload quiz cannot be fetched.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to load the quiz from your upload.";

/// Orchestrates quiz loading and score saving around a `SessionState`.
///
/// The session itself stays a plain value owned by the caller; this service
/// only turns backend calls into events for it.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    source: Arc<dyn QuizSource>,
    scores: Arc<dyn ScoreSink>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuizSource>, scores: Arc<dyn ScoreSink>) -> Self {
        Self {
            clock,
            source,
            scores,
        }
    }

    /// Fetch questions for a validated request and describe the result as an event.
    ///
    /// Never fails: every backend problem becomes `QuizEvent::LoadFailed` with
    /// the message to show on the start view.
    pub async fn load_event(&self, request: StartRequest) -> QuizEvent {
        let player = request.into_player();
        let result = match player.entry() {
            EntryMode::Topic { topic, difficulty } => self.source.generate(topic, *difficulty).await,
            EntryMode::Upload => self.source.fetch_pending().await,
        };

        match result {
            Ok(quiz) => {
                info!(
                    "loaded {} questions for {:?} ({})",
                    quiz.len(),
                    player.username(),
                    entry_label(player.entry())
                );
                QuizEvent::Loaded { quiz, player }
            }
            Err(err) => {
                warn!("quiz load failed ({}): {err}", entry_label(player.entry()));
                QuizEvent::LoadFailed {
                    message: load_failure_message(player.entry(), &err),
                }
            }
        }
    }

    /// Run a whole start action against `state`: mark it generating, load, apply.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the session is not at the start view or a
    /// request is already in flight. Backend failures are not errors here;
    /// they leave the session at `Phase::Start` with an inline message.
    pub async fn start(
        &self,
        state: &mut SessionState,
        request: StartRequest,
    ) -> Result<Phase, TransitionError> {
        state.apply(QuizEvent::BeginGenerating)?;
        let event = self.load_event(request).await;
        state.apply(event)?;
        Ok(state.phase())
    }

    /// Load the pending upload quiz as a sheet answered all at once.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoQuestions` when nothing is pending, or the backend error.
    pub async fn load_sheet(&self) -> Result<McqSheet, ApiError> {
        let quiz = self.source.fetch_pending().await.map_err(|err| {
            warn!("loading the MCQ sheet failed: {err}");
            err
        })?;
        info!("loaded MCQ sheet with {} questions", quiz.len());
        Ok(McqSheet::new(quiz))
    }

    /// Build the score payload for a finished session.
    ///
    /// `username` is the name currently typed by the player; it may differ from
    /// the one used at start (upload sessions start without one).
    ///
    /// # Errors
    ///
    /// Returns `SaveScoreError::NotFinished` before the game-over view and
    /// `SaveScoreError::MissingUsername` for a blank name.
    pub fn submission(
        &self,
        state: &SessionState,
        username: &str,
    ) -> Result<ScoreSubmission, SaveScoreError> {
        if state.phase() != Phase::Finished {
            return Err(SaveScoreError::NotFinished);
        }
        let username = username.trim();
        if username.is_empty() {
            return Err(SaveScoreError::MissingUsername);
        }
        let topic = state.player().map(|p| p.topic().to_string()).unwrap_or_default();
        Ok(ScoreSubmission {
            username: username.to_string(),
            score: state.score(),
            topic,
            timestamp: self.clock.now(),
        })
    }

    /// Post a prepared submission.
    ///
    /// # Errors
    ///
    /// Returns `SaveScoreError::Failed` so the caller can offer a retry.
    pub async fn submit(&self, submission: &ScoreSubmission) -> Result<(), SaveScoreError> {
        self.scores.record(submission).await.map_err(|err| {
            warn!("saving score for {:?} failed: {err}", submission.username);
            SaveScoreError::Failed(err)
        })?;
        info!(
            "saved score {} for {:?}",
            submission.score, submission.username
        );
        Ok(())
    }

    /// Build and post the score for a finished session.
    ///
    /// # Errors
    ///
    /// See [`QuizSessionService::submission`] and [`QuizSessionService::submit`].
    pub async fn save_score(
        &self,
        state: &SessionState,
        username: &str,
    ) -> Result<ScoreSubmission, SaveScoreError> {
        let submission = self.submission(state, username)?;
        self.submit(&submission).await?;
        Ok(submission)
    }
}

fn entry_label(entry: &EntryMode) -> &'static str {
    match entry {
        EntryMode::Topic { .. } => "topic",
        EntryMode::Upload => "upload",
    }
}

fn load_failure_message(entry: &EntryMode, err: &ApiError) -> String {
    match (entry, err) {
        (EntryMode::Upload, ApiError::NoQuestions) => UPLOAD_EMPTY_MESSAGE.to_string(),
        (EntryMode::Upload, _) => UPLOAD_FAILED_MESSAGE.to_string(),
        (EntryMode::Topic { .. }, ApiError::NoQuestions | ApiError::Rejected { .. }) => {
            err.to_string()
        }
        (EntryMode::Topic { .. }, _) => GENERATE_FALLBACK_MESSAGE.to_string(),
    }
}
