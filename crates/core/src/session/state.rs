use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerRecord, Question, QuizSet, ScoreReport};
use super::scoring::score_quiz;
use super::start::{GENERATING_MESSAGE, Player, ValidationError};
use super::timer::{QuestionTimer, TickResult, TimerEpoch};

//
// ─── PHASE / EVENTS ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Start,
    InProgress,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// Start-view input failed validation; only the inline message changes.
    InputRejected(ValidationError),
    /// A quiz request was sent; the start button goes inert.
    BeginGenerating,
    Loaded { quiz: QuizSet, player: Player },
    LoadFailed { message: String },
    Select(usize),
    Next,
    Back,
    Hint,
    Tick(TimerEpoch),
    Finish,
    PlayAgain,
}

impl QuizEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuizEvent::InputRejected(_) => "input_rejected",
            QuizEvent::BeginGenerating => "begin_generating",
            QuizEvent::Loaded { .. } => "loaded",
            QuizEvent::LoadFailed { .. } => "load_failed",
            QuizEvent::Select(_) => "select",
            QuizEvent::Next => "next",
            QuizEvent::Back => "back",
            QuizEvent::Hint => "hint",
            QuizEvent::Tick(_) => "tick",
            QuizEvent::Finish => "finish",
            QuizEvent::PlayAgain => "play_again",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("{event} is not allowed while the session is {phase}")]
    WrongPhase { event: &'static str, phase: Phase },

    #[error("a quiz is already being generated")]
    AlreadyGenerating,

    #[error("option {index} is out of range for {count} options")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("select an answer before moving on")]
    NoSelection,

    #[error("already at the first question")]
    AtFirstQuestion,
}

/// Inline state of the start view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartScreen {
    pub message: Option<String>,
    pub generating: bool,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// The single owner of all quiz session data.
///
/// `answers.len() == quiz.len()` holds in every phase (both are empty before a
/// quiz is loaded). Mutation only happens through [`SessionState::apply`];
/// a rejected event leaves the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    quiz: Option<QuizSet>,
    answers: Vec<AnswerRecord>,
    current: usize,
    score: u32,
    streak: u32,
    max_streak: u32,
    phase: Phase,
    timer: QuestionTimer,
    report: Option<ScoreReport>,
    start: StartScreen,
    player: Option<Player>,
}

/// Pure form of [`SessionState::apply`].
///
/// # Errors
///
/// Returns `TransitionError` when the event is not valid for the state.
pub fn transition(mut state: SessionState, event: QuizEvent) -> Result<SessionState, TransitionError> {
    state.apply(event)?;
    Ok(state)
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSet> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.answers.len()
    }

    /// Index of the active question; only meaningful while in progress.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (self.phase == Phase::InProgress).then_some(self.current)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        let idx = self.current_index()?;
        self.quiz.as_ref()?.get(idx)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        let idx = self.current_index()?;
        self.answers.get(idx)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.answers.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    #[must_use]
    pub fn timer(&self) -> &QuestionTimer {
        &self.timer
    }

    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn start_screen(&self) -> &StartScreen {
        &self.start
    }

    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` for events outside their phase and
    /// the specific variant for rejected navigation or selection. The state is
    /// unchanged on error.
    pub fn apply(&mut self, event: QuizEvent) -> Result<(), TransitionError> {
        let name = event.name();
        match event {
            QuizEvent::InputRejected(err) => {
                self.expect_phase(Phase::Start, name)?;
                self.start.message = Some(err.to_string());
            }
            QuizEvent::BeginGenerating => {
                self.expect_phase(Phase::Start, name)?;
                if self.start.generating {
                    return Err(TransitionError::AlreadyGenerating);
                }
                self.start = StartScreen {
                    message: Some(GENERATING_MESSAGE.to_string()),
                    generating: true,
                };
            }
            QuizEvent::Loaded { quiz, player } => {
                self.expect_phase(Phase::Start, name)?;
                self.load(quiz, player);
            }
            QuizEvent::LoadFailed { message } => {
                self.expect_phase(Phase::Start, name)?;
                self.start = StartScreen {
                    message: Some(message),
                    generating: false,
                };
            }
            QuizEvent::Select(index) => {
                self.expect_phase(Phase::InProgress, name)?;
                let count = self.current_question().map_or(0, |q| q.options().len());
                if index >= count {
                    return Err(TransitionError::OptionOutOfRange { index, count });
                }
                self.answers[self.current].select(index);
                self.show_current();
            }
            QuizEvent::Next => {
                self.expect_phase(Phase::InProgress, name)?;
                if !self.answers[self.current].is_answered() {
                    return Err(TransitionError::NoSelection);
                }
                self.advance();
            }
            QuizEvent::Back => {
                self.expect_phase(Phase::InProgress, name)?;
                if self.current == 0 {
                    return Err(TransitionError::AtFirstQuestion);
                }
                self.current -= 1;
                self.show_current();
            }
            QuizEvent::Hint => {
                self.expect_phase(Phase::InProgress, name)?;
                self.reveal_hint();
            }
            QuizEvent::Tick(epoch) => {
                // A tick from a countdown that no longer exists is dropped in any phase.
                if self.phase != Phase::InProgress {
                    return Ok(());
                }
                if self.timer.tick(epoch) == TickResult::Expired {
                    self.answers[self.current].clear_selection();
                    self.streak = 0;
                    self.advance();
                }
            }
            QuizEvent::Finish => {
                self.expect_phase(Phase::InProgress, name)?;
                self.finish();
            }
            QuizEvent::PlayAgain => {
                let mut timer = self.timer;
                timer.cancel();
                *self = Self {
                    timer,
                    ..Self::default()
                };
            }
        }
        Ok(())
    }

    fn expect_phase(&self, expected: Phase, event: &'static str) -> Result<(), TransitionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongPhase {
                event,
                phase: self.phase,
            })
        }
    }

    fn load(&mut self, quiz: QuizSet, player: Player) {
        self.answers = vec![AnswerRecord::unanswered(); quiz.len()];
        self.quiz = Some(quiz);
        self.current = 0;
        self.score = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.report = None;
        self.player = Some(player);
        self.start = StartScreen::default();
        self.phase = Phase::InProgress;
        self.show_current();
    }

    /// Re-display the active question, which always restarts its countdown.
    fn show_current(&mut self) {
        self.timer.restart();
    }

    fn advance(&mut self) {
        if self.is_last_question() {
            self.finish();
        } else {
            self.current += 1;
            self.show_current();
        }
    }

    fn reveal_hint(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        let record = self.answers[self.current];
        if record.hint_revealed() {
            return;
        }
        let eliminated = super::hint::hint_candidate(question, record.selected());
        self.answers[self.current].reveal_hint(eliminated);
    }

    fn finish(&mut self) {
        self.timer.cancel();
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let scoring = score_quiz(quiz, &self.answers);
        self.score = scoring.report.score;
        self.max_streak = scoring.report.max_streak;
        self.streak = scoring.final_streak;
        self.report = Some(scoring.report);
        self.phase = Phase::Finished;
    }
}
