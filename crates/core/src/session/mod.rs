mod hint;
mod scoring;
mod sheet;
mod start;
mod state;
mod timer;

pub use hint::hint_candidate;
pub use scoring::{Scoring, score_quiz};
pub use sheet::{McqSheet, OptionMark, SheetError, option_letter};
pub use start::{EntryMode, GENERATING_MESSAGE, Player, StartRequest, ValidationError};
pub use state::{Phase, QuizEvent, SessionState, StartScreen, TransitionError, transition};
pub use timer::{QUESTION_TIME_SECS, QuestionTimer, TimerEpoch};
