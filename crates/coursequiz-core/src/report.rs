//! Completion report emitted when a quiz attempt finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::Grade;
use crate::model::QuizDefinition;
use crate::statistics::ScoreSummary;

/// The result of one completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Unique attempt identifier.
    pub attempt_id: Uuid,
    /// When the attempt started.
    pub started_at: DateTime<Utc>,
    /// When the last question was submitted.
    pub completed_at: DateTime<Utc>,
    /// Aggregate counts and the integer score.
    pub summary: ScoreSummary,
    /// Per-question outcomes in quiz order.
    pub questions: Vec<QuestionOutcome>,
}

/// Outcome of a single question within an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub id: String,
    pub kind: String,
    pub grade: Grade,
}

impl Completion {
    pub(crate) fn new(
        attempt_id: Uuid,
        started_at: DateTime<Utc>,
        definition: &QuizDefinition,
        grades: &[Grade],
    ) -> Self {
        let questions = definition
            .iter()
            .zip(grades)
            .map(|(question, grade)| QuestionOutcome {
                id: question.id.clone(),
                kind: question.kind.tag().to_string(),
                grade: *grade,
            })
            .collect();

        Self {
            attempt_id,
            started_at,
            completed_at: Utc::now(),
            summary: ScoreSummary::from_grades(grades),
            questions,
        }
    }

    /// The integer percentage score.
    pub fn score(&self) -> u8 {
        self.summary.score
    }

    /// Questions that did not earn credit.
    pub fn missed(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.questions.iter().filter(|q| !q.grade.is_correct())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode_quiz;

    #[test]
    fn completion_lists_outcomes_in_order() {
        let quiz = decode_quiz(
            r#"{"questions": [
                {"id": "one", "questionType": "trueFalse", "correctAnswer": 0},
                {"id": "two", "questionType": "fillInBlank", "correctText": "x"},
                {"id": "three", "questionType": "ordering", "correctOrder": ["a", "b"]}
            ]}"#,
        )
        .unwrap();
        let grades = [Grade::Correct, Grade::Unanswered, Grade::Incorrect];
        let completion = Completion::new(Uuid::nil(), Utc::now(), &quiz, &grades);

        assert_eq!(completion.score(), 33);
        let ids: Vec<_> = completion.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "two", "three"]);
        assert_eq!(completion.questions[1].kind, "fillInBlank");
        assert_eq!(completion.missed().count(), 2);
    }

    #[test]
    fn completion_json_uses_lowercase_grades() {
        let quiz = decode_quiz(r#"{"questions": [{"id": "a", "questionType": "trueFalse", "correctAnswer": 0}]}"#)
            .unwrap();
        let completion = Completion::new(Uuid::nil(), Utc::now(), &quiz, &[Grade::Correct]);
        let json = serde_json::to_string(&completion).unwrap();
        assert!(json.contains(r#""grade":"correct""#));
        assert!(json.contains(r#""score":100"#));

        let back: Completion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, completion);
    }
}
