//! Answer evaluation: "is answered" and "is correct" per question kind.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{AnswerState, Question, QuestionKind};

/// Outcome of a single question when scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Correct,
    Incorrect,
    Unanswered,
}

impl Grade {
    pub fn is_correct(self) -> bool {
        self == Grade::Correct
    }
}

/// Whether `state` holds a meaningful answer for `question`.
///
/// Ordering questions count as answered as soon as their arrangement exists,
/// before the learner moves anything.
pub fn is_answered(question: &Question, state: &AnswerState) -> Result<bool, QuizError> {
    let answered = match (&question.kind, state) {
        (
            QuestionKind::MultipleChoice { .. } | QuestionKind::TrueFalse { .. },
            AnswerState::Choice { selected },
        ) => selected.is_some(),
        (QuestionKind::MultiSelect { .. }, AnswerState::MultiSelect { selected }) => {
            !selected.is_empty()
        }
        (QuestionKind::FillInBlank { .. }, AnswerState::FillInBlank { text }) => text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty()),
        (QuestionKind::Matching { pairs }, AnswerState::Matching { pairs: mapping }) => {
            mapping.len() == pairs.len()
        }
        (QuestionKind::Ordering { .. }, AnswerState::Ordering { order, .. }) => order.is_some(),
        _ => return Err(mismatch(question, state)),
    };
    Ok(answered)
}

/// Whether the answer in `state` is correct.
///
/// Only defined once [`is_answered`] holds; calling it earlier is a
/// precondition violation.
pub fn is_correct(question: &Question, state: &AnswerState) -> Result<bool, QuizError> {
    if !is_answered(question, state)? {
        return Err(QuizError::precondition(format!(
            "correctness requested for unanswered question '{}'",
            question.id
        )));
    }

    let correct = match (&question.kind, state) {
        (
            QuestionKind::MultipleChoice { correct_index, .. }
            | QuestionKind::TrueFalse { correct_index, .. },
            AnswerState::Choice { selected },
        ) => *selected == Some(*correct_index),
        (
            QuestionKind::MultiSelect {
                correct_indices, ..
            },
            AnswerState::MultiSelect { selected },
        ) => selected.len() == correct_indices.len() && selected.is_subset(correct_indices),
        (
            QuestionKind::FillInBlank {
                correct_text,
                case_sensitive,
            },
            AnswerState::FillInBlank { text: Some(text) },
        ) => {
            if *case_sensitive {
                text == correct_text
            } else {
                text.to_lowercase() == correct_text.to_lowercase()
            }
        }
        (QuestionKind::Matching { pairs }, AnswerState::Matching { pairs: mapping }) => {
            (0..pairs.len()).all(|left| mapping.get(&left) == Some(&left))
        }
        (
            QuestionKind::Ordering { correct_order },
            AnswerState::Ordering {
                order: Some(order), ..
            },
        ) => order == correct_order,
        _ => return Err(mismatch(question, state)),
    };
    Ok(correct)
}

/// Grade a question, treating an unanswered one as its own outcome.
pub fn grade(question: &Question, state: &AnswerState) -> Result<Grade, QuizError> {
    if !is_answered(question, state)? {
        return Ok(Grade::Unanswered);
    }
    Ok(if is_correct(question, state)? {
        Grade::Correct
    } else {
        Grade::Incorrect
    })
}

fn mismatch(question: &Question, state: &AnswerState) -> QuizError {
    QuizError::precondition(format!(
        "answer state {state:?} does not fit {} question '{}'",
        question.kind, question.id
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::model::MatchPair;

    fn question(kind: QuestionKind) -> Question {
        Question {
            id: "q".into(),
            prompt: "prompt".into(),
            kind,
        }
    }

    fn multiple_choice() -> Question {
        question(QuestionKind::MultipleChoice {
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index: 2,
        })
    }

    fn fill_in(case_sensitive: bool) -> Question {
        question(QuestionKind::FillInBlank {
            correct_text: "Paris".into(),
            case_sensitive,
        })
    }

    fn matching() -> Question {
        question(QuestionKind::Matching {
            pairs: vec![
                MatchPair::new("France", "Paris"),
                MatchPair::new("Spain", "Madrid"),
                MatchPair::new("Italy", "Rome"),
            ],
        })
    }

    fn ordering() -> Question {
        question(QuestionKind::Ordering {
            correct_order: vec!["a".into(), "b".into(), "c".into()],
        })
    }

    fn text(value: &str) -> AnswerState {
        AnswerState::FillInBlank {
            text: Some(value.into()),
        }
    }

    fn mapping(entries: &[(usize, usize)]) -> AnswerState {
        AnswerState::Matching {
            pairs: entries.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn order(items: &[&str]) -> AnswerState {
        AnswerState::Ordering {
            order: Some(items.iter().map(|s| s.to_string()).collect()),
            moves: 0,
        }
    }

    #[test]
    fn fresh_states_are_unanswered() {
        let questions = [
            multiple_choice(),
            question(QuestionKind::TrueFalse {
                options: vec!["True".into(), "False".into()],
                correct_index: 0,
            }),
            question(QuestionKind::MultiSelect {
                options: vec!["x".into(), "y".into()],
                correct_indices: BTreeSet::from([0]),
            }),
            matching(),
            fill_in(false),
            ordering(),
        ];
        for q in &questions {
            let state = AnswerState::unset(&q.kind);
            assert!(!is_answered(q, &state).unwrap(), "{}", q.kind);
        }
    }

    #[test]
    fn ordering_counts_as_answered_once_arranged() {
        // Observed behavior: no move is needed.
        assert!(is_answered(&ordering(), &order(&["c", "a", "b"])).unwrap());
    }

    #[test]
    fn multiple_choice_correctness() {
        let q = multiple_choice();
        let right = AnswerState::Choice { selected: Some(2) };
        let wrong = AnswerState::Choice { selected: Some(0) };
        assert!(is_correct(&q, &right).unwrap());
        assert!(!is_correct(&q, &wrong).unwrap());
    }

    #[test]
    fn multi_select_requires_set_equality() {
        let q = question(QuestionKind::MultiSelect {
            options: vec!["2".into(), "3".into(), "4".into(), "5".into()],
            correct_indices: BTreeSet::from([0, 1, 3]),
        });
        let exact = AnswerState::MultiSelect {
            selected: BTreeSet::from([3, 0, 1]),
        };
        let subset = AnswerState::MultiSelect {
            selected: BTreeSet::from([0, 1]),
        };
        let swapped = AnswerState::MultiSelect {
            selected: BTreeSet::from([0, 1, 2]),
        };
        assert!(is_correct(&q, &exact).unwrap());
        assert!(!is_correct(&q, &subset).unwrap());
        assert!(!is_correct(&q, &swapped).unwrap());
    }

    #[test]
    fn fill_in_blank_case_rules() {
        let insensitive = fill_in(false);
        assert!(is_correct(&insensitive, &text("PARIS")).unwrap());
        assert!(is_correct(&insensitive, &text("paris")).unwrap());

        let sensitive = fill_in(true);
        assert!(is_correct(&sensitive, &text("Paris")).unwrap());
        assert!(!is_correct(&sensitive, &text("paris")).unwrap());
        assert!(!is_correct(&sensitive, &text("PARIS")).unwrap());
    }

    #[test]
    fn fill_in_blank_trims_only_for_answered() {
        let q = fill_in(false);
        assert!(!is_answered(&q, &text("   ")).unwrap());
        assert!(!is_answered(&q, &text("")).unwrap());
        assert!(is_answered(&q, &text(" paris ")).unwrap());
        assert!(!is_correct(&q, &text(" paris ")).unwrap());
    }

    #[test]
    fn matching_needs_complete_identity_mapping() {
        let q = matching();
        assert!(is_correct(&q, &mapping(&[(0, 0), (1, 1), (2, 2)])).unwrap());
        assert!(!is_correct(&q, &mapping(&[(0, 0), (1, 2), (2, 1)])).unwrap());
        // Two lefts pointing at one right are recorded but never correct.
        assert!(!is_correct(&q, &mapping(&[(0, 0), (1, 0), (2, 2)])).unwrap());

        let partial = mapping(&[(0, 0), (1, 1)]);
        assert!(!is_answered(&q, &partial).unwrap());
        assert_eq!(grade(&q, &partial).unwrap(), Grade::Unanswered);
    }

    #[test]
    fn ordering_is_order_sensitive() {
        let q = ordering();
        assert!(is_correct(&q, &order(&["a", "b", "c"])).unwrap());
        assert!(!is_correct(&q, &order(&["b", "a", "c"])).unwrap());
    }

    #[test]
    fn ordering_compares_values_not_positions() {
        let q = question(QuestionKind::Ordering {
            correct_order: vec!["x".into(), "x".into(), "y".into()],
        });
        assert!(is_correct(&q, &order(&["x", "x", "y"])).unwrap());
        assert!(!is_correct(&q, &order(&["x", "y", "x"])).unwrap());
    }

    #[test]
    fn correctness_before_answer_is_a_precondition_violation() {
        let q = multiple_choice();
        let err = is_correct(&q, &AnswerState::Choice { selected: None }).unwrap_err();
        assert!(matches!(err, QuizError::PreconditionViolation { .. }));
    }

    #[test]
    fn mismatched_state_is_a_precondition_violation() {
        let q = multiple_choice();
        let err = is_answered(&q, &text("A")).unwrap_err();
        assert!(matches!(err, QuizError::PreconditionViolation { .. }));
    }

    #[test]
    fn grade_outcomes() {
        let q = multiple_choice();
        assert_eq!(
            grade(&q, &AnswerState::Choice { selected: Some(2) }).unwrap(),
            Grade::Correct
        );
        assert_eq!(
            grade(&q, &AnswerState::Choice { selected: Some(1) }).unwrap(),
            Grade::Incorrect
        );
        assert_eq!(
            grade(&q, &AnswerState::Choice { selected: None }).unwrap(),
            Grade::Unanswered
        );
    }
}
