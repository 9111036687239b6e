use crate::model::Question;

/// Option to reveal as wrong: the first one in declared order that is neither
/// the correct answer nor the current selection.
#[must_use]
pub fn hint_candidate(question: &Question, selected: Option<usize>) -> Option<usize> {
    (0..question.options().len())
        .find(|&idx| idx != question.correct_index() && Some(idx) != selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_option_question_with_wrong_selection_has_no_candidate() {
        let q = Question::new("Q", vec!["yes".into(), "no".into()], 0, None).unwrap();
        assert_eq!(hint_candidate(&q, Some(1)), None);
        assert_eq!(hint_candidate(&q, None), Some(1));
    }

    #[test]
    fn zero_selection_is_a_real_selection() {
        let q = Question::new("Q", vec!["a".into(), "b".into(), "c".into()], 2, None).unwrap();
        assert_eq!(hint_candidate(&q, Some(0)), Some(1));
    }
}
