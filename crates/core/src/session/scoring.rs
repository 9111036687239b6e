use crate::model::{AnswerRecord, NO_ANSWER, Question, QuizSet, ScoreReport, WrongAnswer};

/// Result of a scoring pass, including the streak still running at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    pub report: ScoreReport,
    pub final_streak: u32,
}

/// Score a quiz from scratch against the recorded answers.
///
/// A question is correct iff its selection equals its correct index. Missing
/// answer slots count as unanswered.
#[must_use]
pub fn score_quiz(quiz: &QuizSet, answers: &[AnswerRecord]) -> Scoring {
    let mut score = 0_u32;
    let mut streak = 0_u32;
    let mut max_streak = 0_u32;
    let mut wrong = Vec::new();

    for (idx, question) in quiz.iter().enumerate() {
        let selected = answers.get(idx).and_then(AnswerRecord::selected);
        if question.is_correct(selected) {
            score = score.saturating_add(1);
            streak = streak.saturating_add(1);
            max_streak = max_streak.max(streak);
        } else {
            wrong.push(wrong_answer(idx, question, selected));
            streak = 0;
        }
    }

    Scoring {
        report: ScoreReport {
            score,
            total: u32::try_from(quiz.len()).unwrap_or(u32::MAX),
            max_streak,
            wrong,
        },
        final_streak: streak,
    }
}

fn wrong_answer(idx: usize, question: &Question, selected: Option<usize>) -> WrongAnswer {
    let your_answer = selected
        .and_then(|choice| question.option(choice))
        .unwrap_or(NO_ANSWER)
        .to_string();
    WrongAnswer {
        number: idx + 1,
        question: question.text().to_string(),
        your_answer,
        correct_answer: question.correct_option().to_string(),
        explanation: question.explanation().map(str::to_string),
    }
}
