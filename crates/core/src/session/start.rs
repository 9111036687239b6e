use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Difficulty;

/// Inline message shown on the start view while a quiz is being generated.
pub const GENERATING_MESSAGE: &str = "Generating quiz... Please wait.";

/// Input problems caught before any request is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Please enter your name for the leaderboard.")]
    MissingUsername,
    #[error("Please enter a topic to start the quiz.")]
    MissingTopic,
}

/// How a session gets its questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryMode {
    Topic { topic: String, difficulty: Difficulty },
    /// Questions generated earlier from an uploaded document.
    Upload,
}

/// Who is playing and what they asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    username: String,
    entry: EntryMode,
}

impl Player {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn entry(&self) -> &EntryMode {
        &self.entry
    }

    /// Topic saved with the score; empty for upload sessions.
    #[must_use]
    pub fn topic(&self) -> &str {
        match &self.entry {
            EntryMode::Topic { topic, .. } => topic,
            EntryMode::Upload => "",
        }
    }
}

/// A validated request to begin a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    player: Player,
}

impl StartRequest {
    /// Validate start-view input for a topic quiz. Inputs are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingUsername` when the name is blank, then
    /// `ValidationError::MissingTopic` when the topic is blank.
    pub fn topic(
        username: &str,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Self, ValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::MissingTopic);
        }
        Ok(Self {
            player: Player {
                username: username.to_string(),
                entry: EntryMode::Topic {
                    topic: topic.to_string(),
                    difficulty,
                },
            },
        })
    }

    /// Upload sessions start without a prompt; the name may be filled in later.
    #[must_use]
    pub fn upload(username: &str) -> Self {
        Self {
            player: Player {
                username: username.trim().to_string(),
                entry: EntryMode::Upload,
            },
        }
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }
}
