mod answer;
pub mod leaderboard;
mod question;
mod quiz_set;
mod report;

pub use answer::AnswerRecord;
pub use leaderboard::{
    ExportError, LeaderboardEntry, RankTier, RankedEntry, ScoreSubmission, distinct_topics,
    export_csv, format_entry_date, rank_entries,
};
pub use question::{Question, QuestionError};
pub use quiz_set::{Difficulty, ParseDifficultyError, QuizSet, QuizSetError};
pub use report::{NO_ANSWER, ScoreReport, WrongAnswer};
