use quizera_core::session::{McqSheet, OptionMark, option_letter};

use super::quiz_vm::MistakeVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McqOptionVm {
    pub question: usize,
    pub index: usize,
    pub label: String,
    pub checked: bool,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McqQuestionVm {
    pub number: usize,
    pub prompt: String,
    pub options: Vec<McqOptionVm>,
    /// Only set once the sheet is submitted.
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McqResultVm {
    pub score_label: String,
    pub review: Vec<MistakeVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McqSheetVm {
    pub questions: Vec<McqQuestionVm>,
    pub submitted: bool,
    pub result: Option<McqResultVm>,
}

fn mark_class(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::Unmarked => "mcq-option",
        OptionMark::Correct => "mcq-option correct",
        OptionMark::Incorrect => "mcq-option incorrect",
    }
}

#[must_use]
pub fn render_sheet(sheet: &McqSheet) -> McqSheetVm {
    let submitted = sheet.is_submitted();
    let questions = sheet
        .quiz()
        .iter()
        .enumerate()
        .map(|(qi, question)| McqQuestionVm {
            number: qi + 1,
            prompt: question.text().to_string(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(oi, text)| McqOptionVm {
                    question: qi,
                    index: oi,
                    label: format!("{}. {text}", option_letter(oi)),
                    checked: sheet.selected(qi) == Some(oi),
                    class: mark_class(sheet.mark(qi, oi)),
                })
                .collect(),
            explanation: question
                .explanation()
                .filter(|_| submitted)
                .map(str::to_string),
        })
        .collect();

    let result = sheet.report().map(|report| McqResultVm {
        score_label: format!(
            "Score: {} / {} ({}%)",
            report.score,
            report.total,
            report.percent()
        ),
        review: report
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
    });

    McqSheetVm {
        questions,
        submitted,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizera_core::model::{Question, QuizSet};

    fn sheet() -> McqSheet {
        McqSheet::new(
            QuizSet::new(vec![
                Question::new("Largest planet?", vec!["Mars".into(), "Jupiter".into()], 1, Some("It is a gas giant.".into()))
                    .unwrap(),
                Question::new("Red planet?", vec!["Mars".into(), "Venus".into()], 0, None).unwrap(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn unsubmitted_sheet_hides_marks_and_explanations() {
        let mut sheet = sheet();
        sheet.select(0, 0).unwrap();
        let vm = render_sheet(&sheet);

        assert!(!vm.submitted);
        assert!(vm.result.is_none());
        assert_eq!(vm.questions[0].options[0].label, "A. Mars");
        assert_eq!(vm.questions[0].options[1].label, "B. Jupiter");
        assert!(vm.questions[0].options[0].checked);
        assert!(vm.questions[0].options.iter().all(|o| o.class == "mcq-option"));
        assert_eq!(vm.questions[0].explanation, None);
    }

    #[test]
    fn submitted_sheet_marks_options_and_reviews_mistakes() {
        let mut sheet = sheet();
        sheet.select(0, 0).unwrap();
        sheet.select(1, 0).unwrap();
        sheet.submit();
        let vm = render_sheet(&sheet);

        let first = &vm.questions[0];
        assert_eq!(first.options[0].class, "mcq-option incorrect");
        assert_eq!(first.options[1].class, "mcq-option correct");
        assert_eq!(first.explanation.as_deref(), Some("It is a gas giant."));
        assert_eq!(vm.questions[1].options[0].class, "mcq-option correct");

        let result = vm.result.unwrap();
        assert_eq!(result.score_label, "Score: 1 / 2 (50%)");
        assert_eq!(result.review.len(), 1);
        assert_eq!(result.review[0].your_answer, "Mars");
        assert_eq!(result.review[0].correct_answer, "Jupiter");
    }
}
