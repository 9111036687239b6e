use thiserror::Error;

use crate::model::{AnswerRecord, QuizSet, ScoreReport};

use super::scoring::score_quiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("the sheet was already submitted")]
    AlreadySubmitted,
    #[error("question {question} has no option {option}")]
    NoSuchOption { question: usize, option: usize },
}

/// How an option is marked once the sheet is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Unmarked,
    Correct,
    Incorrect,
}

/// `A` for option 0, `B` for option 1, and so on.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

/// Every question of a quiz answered on one page and graded in a single pass.
///
/// Selections are free until `submit`; afterwards the sheet is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqSheet {
    quiz: QuizSet,
    answers: Vec<AnswerRecord>,
    report: Option<ScoreReport>,
}

impl McqSheet {
    #[must_use]
    pub fn new(quiz: QuizSet) -> Self {
        let answers = vec![AnswerRecord::unanswered(); quiz.len()];
        Self {
            quiz,
            answers,
            report: None,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSet {
        &self.quiz
    }

    #[must_use]
    pub fn selected(&self, question: usize) -> Option<usize> {
        self.answers.get(question).and_then(AnswerRecord::selected)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.report.is_some()
    }

    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    /// # Errors
    ///
    /// `AlreadySubmitted` after grading; `NoSuchOption` for an index outside the quiz.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), SheetError> {
        if self.is_submitted() {
            return Err(SheetError::AlreadySubmitted);
        }
        let in_range = self
            .quiz
            .get(question)
            .is_some_and(|q| option < q.options().len());
        match self.answers.get_mut(question) {
            Some(record) if in_range => {
                record.select(option);
                Ok(())
            }
            _ => Err(SheetError::NoSuchOption { question, option }),
        }
    }

    /// Grade the sheet. Submitting twice returns the first report unchanged.
    pub fn submit(&mut self) -> &ScoreReport {
        let answers = &self.answers;
        let quiz = &self.quiz;
        self.report
            .get_or_insert_with(|| score_quiz(quiz, answers).report)
    }

    /// `Unmarked` until submitted; then the right option is `Correct` and a
    /// wrong pick is `Incorrect`.
    #[must_use]
    pub fn mark(&self, question: usize, option: usize) -> OptionMark {
        let Some(q) = self.quiz.get(question).filter(|_| self.is_submitted()) else {
            return OptionMark::Unmarked;
        };
        if option == q.correct_index() {
            OptionMark::Correct
        } else if self.selected(question) == Some(option) {
            OptionMark::Incorrect
        } else {
            OptionMark::Unmarked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NO_ANSWER, Question};

    fn sheet() -> McqSheet {
        let question = |text: &str, correct| {
            Question::new(
                text,
                vec!["red".into(), "green".into(), "blue".into()],
                correct,
                Some(format!("{text} because")),
            )
            .unwrap()
        };
        McqSheet::new(QuizSet::new(vec![question("Q1", 0), question("Q2", 2), question("Q3", 1)]).unwrap())
    }

    #[test]
    fn letters_follow_the_alphabet() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(option_letter(25), 'Z');
        assert_eq!(option_letter(26), '?');
    }

    #[test]
    fn submit_grades_and_locks_the_sheet() {
        let mut sheet = sheet();
        sheet.select(0, 1).unwrap();
        sheet.select(0, 0).unwrap();
        sheet.select(1, 1).unwrap();

        let report = sheet.submit().clone();
        assert_eq!((report.score, report.total), (1, 3));
        assert_eq!(report.percent(), 33);
        assert_eq!(report.wrong.len(), 2);
        assert_eq!(report.wrong[0].your_answer, "green");
        assert_eq!(report.wrong[0].correct_answer, "blue");
        assert_eq!(report.wrong[1].your_answer, NO_ANSWER);

        assert_eq!(sheet.select(2, 1), Err(SheetError::AlreadySubmitted));
        assert_eq!(sheet.submit(), &report);
    }

    #[test]
    fn marks_appear_only_after_submit() {
        let mut sheet = sheet();
        sheet.select(1, 0).unwrap();
        assert_eq!(sheet.mark(1, 2), OptionMark::Unmarked);

        sheet.submit();
        assert_eq!(sheet.mark(1, 2), OptionMark::Correct);
        assert_eq!(sheet.mark(1, 0), OptionMark::Incorrect);
        assert_eq!(sheet.mark(1, 1), OptionMark::Unmarked);
        assert_eq!(sheet.mark(2, 1), OptionMark::Correct);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut sheet = sheet();
        assert_eq!(
            sheet.select(0, 3),
            Err(SheetError::NoSuchOption { question: 0, option: 3 })
        );
        assert!(sheet.select(9, 0).is_err());
        assert_eq!(sheet.selected(0), None);
    }
}
