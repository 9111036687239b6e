use quizera_core::model::ScoreReport;
use quizera_core::session::{Phase, SessionState};

/// Everything the quiz page shows, derived from the session alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Start(StartVm),
    Question(QuestionVm),
    GameOver(GameOverVm),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartVm {
    pub message: Option<String>,
    pub generating: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub text: String,
    pub selected: bool,
    pub eliminated: bool,
}

impl OptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match (self.selected, self.eliminated) {
            (true, _) => "option-btn selected",
            (false, true) => "option-btn eliminated",
            (false, false) => "option-btn",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub total: usize,
    pub progress_label: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub time_left_label: Option<String>,
    pub hint_enabled: bool,
    pub hint_text: Option<String>,
    pub streak_text: Option<String>,
    pub next_label: &'static str,
    pub next_enabled: bool,
    pub show_back: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MistakeVm {
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverVm {
    pub score_label: String,
    pub percent: u32,
    pub max_streak: u32,
    pub mistakes: Vec<MistakeVm>,
}

impl GameOverVm {
    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.mistakes.is_empty()
    }
}

impl From<&ScoreReport> for GameOverVm {
    fn from(report: &ScoreReport) -> Self {
        Self {
            score_label: format!("{} / {}", report.score, report.total),
            percent: report.percent(),
            max_streak: report.max_streak,
            mistakes: report
                .wrong
                .iter()
                .map(|wrong| MistakeVm {
                    number: wrong.number,
                    question: wrong.question.clone(),
                    your_answer: wrong.your_answer.clone(),
                    correct_answer: wrong.correct_answer.clone(),
                    explanation: wrong.explanation.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Recompute the whole quiz page from the session.
#[must_use]
pub fn render(state: &SessionState) -> QuizScreen {
    match state.phase() {
        Phase::Start => {
            let start = state.start_screen();
            QuizScreen::Start(StartVm {
                message: start.message.clone(),
                generating: start.generating,
            })
        }
        Phase::InProgress => render_question(state).map_or_else(
            || QuizScreen::Start(StartVm::default()),
            QuizScreen::Question,
        ),
        Phase::Finished => QuizScreen::GameOver(
            state
                .report()
                .map(GameOverVm::from)
                .unwrap_or_else(|| GameOverVm::from(&empty_report())),
        ),
    }
}

fn render_question(state: &SessionState) -> Option<QuestionVm> {
    let idx = state.current_index()?;
    let question = state.current_question()?;
    let answer = state.current_answer()?;
    let total = state.total_questions();

    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, text)| OptionVm {
            index: i,
            text: text.clone(),
            selected: answer.selected() == Some(i),
            eliminated: answer.eliminated() == Some(i),
        })
        .collect();
    let hint_text = answer
        .eliminated()
        .and_then(|i| question.option(i))
        .map(|text| format!("Hint: Option \"{text}\" is NOT correct."));
    let streak = state.streak();

    Some(QuestionVm {
        number: idx + 1,
        total,
        progress_label: format!("Question {} of {total}", idx + 1),
        prompt: question.text().to_string(),
        options,
        time_left_label: state
            .timer()
            .remaining()
            .map(|secs| format!("Time left: {secs}s")),
        hint_enabled: !answer.hint_revealed(),
        hint_text,
        streak_text: (streak > 1).then(|| format!("Streak: {streak} correct in a row!")),
        next_label: if state.is_last_question() {
            "Submit Quiz"
        } else {
            "Next"
        },
        next_enabled: answer.is_answered(),
        show_back: idx > 0,
    })
}

fn empty_report() -> ScoreReport {
    ScoreReport {
        score: 0,
        total: 0,
        max_streak: 0,
        wrong: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizera_core::model::{Difficulty, Question, QuizSet};
    use quizera_core::session::{QuizEvent, StartRequest};

    fn started() -> SessionState {
        let quiz = QuizSet::new(vec![
            Question::new("2+2?", vec!["3".into(), "4".into(), "5".into()], 1, None).unwrap(),
            Question::new(
                "Capital of Norway?",
                vec!["Oslo".into(), "Bergen".into()],
                0,
                Some("Oslo has been the capital since 1814.".into()),
            )
            .unwrap(),
        ])
        .unwrap();
        let player = StartRequest::topic("ann", "mixed", Difficulty::Easy)
            .unwrap()
            .into_player();
        let mut state = SessionState::new();
        state.apply(QuizEvent::Loaded { quiz, player }).unwrap();
        state
    }

    #[test]
    fn start_screen_shows_generating_message() {
        let mut state = SessionState::new();
        state.apply(QuizEvent::BeginGenerating).unwrap();
        let QuizScreen::Start(vm) = render(&state) else {
            panic!("expected start screen");
        };
        assert!(vm.generating);
        assert_eq!(vm.message.as_deref(), Some("Generating quiz... Please wait."));
    }

    #[test]
    fn first_question_layout() {
        let QuizScreen::Question(vm) = render(&started()) else {
            panic!("expected question");
        };
        assert_eq!(vm.progress_label, "Question 1 of 2");
        assert_eq!(vm.time_left_label.as_deref(), Some("Time left: 20s"));
        assert_eq!(vm.next_label, "Next");
        assert!(!vm.next_enabled);
        assert!(!vm.show_back);
        assert!(vm.hint_enabled);
        assert_eq!(vm.options.len(), 3);
        assert_eq!(vm.options[0].class(), "option-btn");
    }

    #[test]
    fn selection_and_hint_are_reflected() {
        let mut state = started();
        state.apply(QuizEvent::Select(0)).unwrap();
        state.apply(QuizEvent::Hint).unwrap();
        let QuizScreen::Question(vm) = render(&state) else {
            panic!("expected question");
        };
        assert!(vm.options[0].selected);
        assert_eq!(vm.options[0].class(), "option-btn selected");
        assert!(vm.options[2].eliminated);
        assert_eq!(vm.hint_text.as_deref(), Some("Hint: Option \"5\" is NOT correct."));
        assert!(!vm.hint_enabled);
        assert!(vm.next_enabled);
    }

    #[test]
    fn back_navigation_still_shows_earlier_choice() {
        let mut state = started();
        state.apply(QuizEvent::Select(1)).unwrap();
        state.apply(QuizEvent::Next).unwrap();
        state.apply(QuizEvent::Select(0)).unwrap();
        state.apply(QuizEvent::Back).unwrap();
        state.apply(QuizEvent::Next).unwrap();
        let QuizScreen::Question(vm) = render(&state) else {
            panic!("expected question");
        };
        assert_eq!(vm.next_label, "Submit Quiz");
        assert!(vm.show_back);
        assert!(vm.options[0].selected);
    }

    #[test]
    fn game_over_lists_mistakes() {
        let mut state = started();
        state.apply(QuizEvent::Select(1)).unwrap();
        state.apply(QuizEvent::Next).unwrap();
        state.apply(QuizEvent::Select(1)).unwrap();
        state.apply(QuizEvent::Next).unwrap();
        let QuizScreen::GameOver(vm) = render(&state) else {
            panic!("expected game over");
        };
        assert_eq!(vm.score_label, "1 / 2");
        assert_eq!(vm.percent, 50);
        assert_eq!(vm.max_streak, 1);
        assert_eq!(vm.mistakes.len(), 1);
        assert_eq!(vm.mistakes[0].your_answer, "Bergen");
        assert_eq!(vm.mistakes[0].correct_answer, "Oslo");
        assert!(!vm.all_correct());
    }
}
