use serde::{Deserialize, Serialize};

/// Text shown for a missed question the player never answered.
pub const NO_ANSWER: &str = "No answer";

/// One entry of the "review your mistakes" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    /// 1-based question number.
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

/// Outcome of the scoring pass run when a session finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub total: u32,
    pub max_streak: u32,
    pub wrong: Vec<WrongAnswer>,
}

impl ScoreReport {
    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.wrong.is_empty()
    }

    /// Score as a whole percentage, rounded half away from zero.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score * 100 + self.total / 2) / self.total
    }
}
