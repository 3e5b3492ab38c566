//! Aggregate scoring.
//!
//! A quiz score is the percentage of correct questions, rounded half-up to an
//! integer. Unanswered questions count as incorrect.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::evaluator::{grade, Grade};
use crate::model::{AnswerState, QuizDefinition};

/// Integer percentage `round(100 * correct / total)`, rounding halves up.
///
/// An empty quiz scores 0.
pub fn percent_score(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    // round(100c/t) == floor((200c + t) / 2t)
    ((200 * correct + total) / (2 * total)) as u8
}

/// Counts behind a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    /// Percentage in `0..=100`.
    pub score: u8,
}

impl ScoreSummary {
    pub fn from_grades(grades: &[Grade]) -> Self {
        let total = grades.len();
        let correct = grades.iter().filter(|g| **g == Grade::Correct).count();
        let unanswered = grades.iter().filter(|g| **g == Grade::Unanswered).count();
        Self {
            total,
            correct,
            incorrect: total - correct - unanswered,
            unanswered,
            score: percent_score(correct, total),
        }
    }
}

/// Grade every question of `definition` against its answer state.
pub fn grade_all(
    definition: &QuizDefinition,
    answers: &[AnswerState],
) -> Result<Vec<Grade>, QuizError> {
    if answers.len() != definition.len() {
        return Err(QuizError::precondition(format!(
            "{} answer states for {} questions",
            answers.len(),
            definition.len()
        )));
    }
    definition
        .iter()
        .zip(answers)
        .map(|(question, state)| grade(question, state))
        .collect()
}

/// Score a set of answers.
pub fn compute_score(
    definition: &QuizDefinition,
    answers: &[AnswerState],
) -> Result<ScoreSummary, QuizError> {
    let grades = grade_all(definition, answers)?;
    Ok(ScoreSummary::from_grades(&grades))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode_quiz;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_score(3, 4), 75);
        assert_eq!(percent_score(1, 3), 33);
        assert_eq!(percent_score(2, 3), 67);
        assert_eq!(percent_score(1, 8), 13);
        assert_eq!(percent_score(0, 5), 0);
        assert_eq!(percent_score(5, 5), 100);
    }

    #[test]
    fn percent_of_empty_quiz_is_zero() {
        assert_eq!(percent_score(0, 0), 0);
    }

    #[test]
    fn summary_counts_unanswered_as_incorrect_for_score() {
        let grades = [
            Grade::Correct,
            Grade::Incorrect,
            Grade::Unanswered,
            Grade::Correct,
        ];
        let summary = ScoreSummary::from_grades(&grades);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.unanswered, 1);
        assert_eq!(summary.score, 50);
    }

    #[test]
    fn compute_score_three_of_four() {
        let quiz = decode_quiz(
            r#"{"questions": [
                {"id": "a", "questionType": "trueFalse", "correctAnswer": 0},
                {"id": "b", "questionType": "trueFalse", "correctAnswer": 1},
                {"id": "c", "questionType": "trueFalse", "correctAnswer": 0},
                {"id": "d", "questionType": "trueFalse", "correctAnswer": 1}
            ]}"#,
        )
        .unwrap();
        let answers = [Some(0), Some(1), Some(0), Some(0)]
            .into_iter()
            .map(|selected| AnswerState::Choice { selected })
            .collect::<Vec<_>>();
        let summary = compute_score(&quiz, &answers).unwrap();
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.score, 75);
    }

    #[test]
    fn compute_score_rejects_misaligned_answers() {
        let quiz = decode_quiz(r#"{"questions": [{"questionType": "trueFalse", "correctAnswer": 0}]}"#)
            .unwrap();
        let err = compute_score(&quiz, &[]).unwrap_err();
        assert!(matches!(err, QuizError::PreconditionViolation { .. }));
    }
}
