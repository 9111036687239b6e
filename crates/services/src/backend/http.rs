use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

use quizera_core::model::{Difficulty, LeaderboardEntry, QuizSet, ScoreSubmission};

use super::wire::{
    ErrorBody, GenerateTopicRequest, LeaderboardResponse, QuestionsResponse, UploadResponse,
    entries_from_wire, quiz_from_wire,
};
use super::{DocumentSource, LeaderboardSource, QuizSource, ScoreSink};
use crate::config::QuizApiConfig;
use crate::error::ApiError;

const GENERATE_TOPIC_PATH: &str = "api/quiz/generate-topic";
const PENDING_QUESTIONS_PATH: &str = "api/quiz/questions";
const UPLOAD_DOCUMENT_PATH: &str = "api/chatbot/upload-and-quiz";
const SCORE_PATH: &str = "api/score";
const LEADERBOARD_PATH: &str = "api/leaderboard";
const LEADERBOARD_CLEAR_PATH: &str = "api/leaderboard/clear";

/// Fallback shown when generation fails without an `{error}` body.
const GENERATE_FAILED: &str = "Failed to generate quiz";

/// HTTP/JSON client for the Quizera backend.
///
/// Keeps a cookie store so the session-scoped pending quiz is visible to
/// `fetch_pending`, and remembers the last quiz generated from an upload.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: QuizApiConfig,
    uploaded: Arc<Mutex<Option<QuizSet>>>,
}

impl HttpQuizApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: QuizApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            config,
            uploaded: Arc::new(Mutex::new(None)),
        })
    }

    #[must_use]
    pub fn config(&self) -> &QuizApiConfig {
        &self.config
    }

    async fn questions(response: Response) -> Result<QuizSet, ApiError> {
        let body: QuestionsResponse = response.json().await?;
        quiz_from_wire(body.questions.unwrap_or_default())
    }

    fn uploaded_quiz(&self) -> Result<Option<QuizSet>, ApiError> {
        self.uploaded
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| ApiError::Unavailable(e.to_string()))
    }

    fn remember_upload(&self, quiz: &QuizSet) -> Result<(), ApiError> {
        let mut guard = self
            .uploaded
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        *guard = Some(quiz.clone());
        Ok(())
    }
}

/// Map a non-2xx status and its body to an error.
///
/// A non-blank `{error}` message becomes `Rejected`; otherwise `fallback` is
/// used, and without one the bare status is reported.
fn rejection(status: StatusCode, body: &str, fallback: Option<&str>) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .or_else(|| fallback.map(str::to_string));
    match message {
        Some(message) => ApiError::Rejected { status, message },
        None => ApiError::HttpStatus(status),
    }
}

async fn rejected(response: Response, fallback: Option<&str>) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = rejection(status, &body, fallback);
    warn!("backend responded {status}: {err}");
    err
}

#[async_trait]
impl QuizSource for HttpQuizApi {
    async fn generate(&self, topic: &str, difficulty: Difficulty) -> Result<QuizSet, ApiError> {
        let url = self.config.endpoint(GENERATE_TOPIC_PATH)?;
        debug!("POST {url} topic={topic:?} difficulty={difficulty}");
        let response = self
            .client
            .post(url)
            .json(&GenerateTopicRequest { topic, difficulty })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response, Some(GENERATE_FAILED)).await);
        }
        Self::questions(response).await
    }

    async fn fetch_pending(&self) -> Result<QuizSet, ApiError> {
        if let Some(quiz) = self.uploaded_quiz()? {
            debug!("using quiz from the last upload ({} questions)", quiz.len());
            return Ok(quiz);
        }

        let url = self.config.endpoint(PENDING_QUESTIONS_PATH)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(rejected(response, None).await);
        }
        Self::questions(response).await
    }
}

#[async_trait]
impl DocumentSource for HttpQuizApi {
    async fn upload_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<QuizSet, ApiError> {
        let url = self.config.endpoint(UPLOAD_DOCUMENT_PATH)?;
        debug!("POST {url} file={file_name:?} ({} bytes)", bytes.len());
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let response = self
            .client
            .post(url)
            .multipart(Form::new().part("file", part))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response, None).await);
        }
        let body: UploadResponse = response.json().await?;
        let quiz = quiz_from_wire(body.quiz.unwrap_or_default())?;
        self.remember_upload(&quiz)?;
        Ok(quiz)
    }
}

#[async_trait]
impl ScoreSink for HttpQuizApi {
    async fn record(&self, submission: &ScoreSubmission) -> Result<(), ApiError> {
        let url = self.config.endpoint(SCORE_PATH)?;
        debug!("POST {url} user={:?} score={}", submission.username, submission.score);
        let response = self.client.post(url).json(submission).send().await?;

        if !response.status().is_success() {
            return Err(rejected(response, None).await);
        }
        Ok(())
    }
}

#[async_trait]
impl LeaderboardSource for HttpQuizApi {
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let url = self.config.endpoint(LEADERBOARD_PATH)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(rejected(response, None).await);
        }
        let body: LeaderboardResponse = response.json().await?;
        Ok(entries_from_wire(body.leaderboard.unwrap_or_default()))
    }

    async fn clear(&self) -> Result<(), ApiError> {
        let url = self.config.endpoint(LEADERBOARD_CLEAR_PATH)?;
        debug!("POST {url}");
        let response = self.client.post(url).send().await?;

        if !response.status().is_success() {
            return Err(rejected(response, None).await);
        }
        Ok(())
    }
}
