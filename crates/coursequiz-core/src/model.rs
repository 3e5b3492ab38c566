//! Core data model types for coursequiz.
//!
//! A quiz is an ordered list of questions, each one of six structurally
//! different kinds. Every kind has a matching answer-state shape.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator values accepted in `questionType`.
pub const KNOWN_QUESTION_TYPES: [&str; 6] = [
    "multipleChoice",
    "trueFalse",
    "multiSelect",
    "matching",
    "fillInBlank",
    "ordering",
];

/// An ordered, immutable sequence of questions.
///
/// Order defines both navigation order and scoring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizDefinition {
    questions: Vec<Question>,
}

impl QuizDefinition {
    pub(crate) fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

/// A single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the quiz and stable across a session.
    #[serde(default)]
    pub id: String,
    /// The text shown to the learner.
    #[serde(default, rename = "question")]
    pub prompt: String,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The six question kinds and their defining fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "questionType", rename_all = "camelCase")]
pub enum QuestionKind {
    MultipleChoice {
        #[serde(default)]
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        correct_index: usize,
    },
    TrueFalse {
        #[serde(default = "true_false_options")]
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        correct_index: usize,
    },
    MultiSelect {
        #[serde(default)]
        options: Vec<String>,
        #[serde(rename = "correctAnswers", default)]
        correct_indices: BTreeSet<usize>,
    },
    /// Left `i` matches right `i`.
    Matching {
        #[serde(default)]
        pairs: Vec<MatchPair>,
    },
    FillInBlank {
        #[serde(rename = "correctText", default)]
        correct_text: String,
        #[serde(rename = "caseSensitive", default)]
        case_sensitive: bool,
    },
    /// Items are unique by position, not necessarily by value.
    Ordering {
        #[serde(rename = "correctOrder", default)]
        correct_order: Vec<String>,
    },
}

fn true_false_options() -> Vec<String> {
    vec!["True".to_string(), "False".to_string()]
}

impl QuestionKind {
    /// The `questionType` tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multipleChoice",
            QuestionKind::TrueFalse { .. } => "trueFalse",
            QuestionKind::MultiSelect { .. } => "multiSelect",
            QuestionKind::Matching { .. } => "matching",
            QuestionKind::FillInBlank { .. } => "fillInBlank",
            QuestionKind::Ordering { .. } => "ordering",
        }
    }

    /// Whether this kind needs a per-session display permutation.
    pub fn needs_shuffle(&self) -> bool {
        matches!(
            self,
            QuestionKind::Matching { .. } | QuestionKind::Ordering { .. }
        )
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One row of a matching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

impl MatchPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Per-question answer state, shaped after the question kind.
///
/// Starts unset and is only mutated through the recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerState {
    /// Multiple choice and true/false.
    Choice { selected: Option<usize> },
    MultiSelect { selected: BTreeSet<usize> },
    /// Left index to original right index; at most one entry per left index.
    Matching { pairs: BTreeMap<usize, usize> },
    /// `None` is unset, which differs from an empty string.
    FillInBlank { text: Option<String> },
    /// The learner's arrangement, present once the question has been shown.
    Ordering {
        order: Option<Vec<String>>,
        moves: u32,
    },
}

impl AnswerState {
    /// The unset state for a question kind.
    pub fn unset(kind: &QuestionKind) -> Self {
        match kind {
            QuestionKind::MultipleChoice { .. } | QuestionKind::TrueFalse { .. } => {
                AnswerState::Choice { selected: None }
            }
            QuestionKind::MultiSelect { .. } => AnswerState::MultiSelect {
                selected: BTreeSet::new(),
            },
            QuestionKind::Matching { .. } => AnswerState::Matching {
                pairs: BTreeMap::new(),
            },
            QuestionKind::FillInBlank { .. } => AnswerState::FillInBlank { text: None },
            QuestionKind::Ordering { .. } => AnswerState::Ordering {
                order: None,
                moves: 0,
            },
        }
    }

    /// Whether this state has the shape `kind` expects.
    pub fn fits(&self, kind: &QuestionKind) -> bool {
        matches!(
            (kind, self),
            (QuestionKind::MultipleChoice { .. }, AnswerState::Choice { .. })
                | (QuestionKind::TrueFalse { .. }, AnswerState::Choice { .. })
                | (QuestionKind::MultiSelect { .. }, AnswerState::MultiSelect { .. })
                | (QuestionKind::Matching { .. }, AnswerState::Matching { .. })
                | (QuestionKind::FillInBlank { .. }, AnswerState::FillInBlank { .. })
                | (QuestionKind::Ordering { .. }, AnswerState::Ordering { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_deserializes_by_tag() {
        let json = r#"{
            "id": "q1",
            "questionType": "fillInBlank",
            "question": "Capital of France?",
            "correctText": "Paris",
            "caseSensitive": true
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "q1");
        assert_eq!(q.prompt, "Capital of France?");
        assert_eq!(
            q.kind,
            QuestionKind::FillInBlank {
                correct_text: "Paris".into(),
                case_sensitive: true,
            }
        );
    }

    #[test]
    fn true_false_options_default() {
        let json = r#"{"id": "tf", "questionType": "trueFalse", "correctAnswer": 1}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        match q.kind {
            QuestionKind::TrueFalse {
                options,
                correct_index,
            } => {
                assert_eq!(options, vec!["True", "False"]);
                assert_eq!(correct_index, 1);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn foreign_fields_are_ignored() {
        let json = r#"{
            "id": "o",
            "questionType": "ordering",
            "options": ["stray"],
            "correctAnswer": 4,
            "correctOrder": ["a", "b"]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(
            q.kind,
            QuestionKind::Ordering {
                correct_order: vec!["a".into(), "b".into()]
            }
        );
    }

    #[test]
    fn unset_state_fits_its_kind() {
        let kinds = [
            QuestionKind::MultipleChoice {
                options: vec![],
                correct_index: 0,
            },
            QuestionKind::MultiSelect {
                options: vec![],
                correct_indices: BTreeSet::new(),
            },
            QuestionKind::Matching { pairs: vec![] },
            QuestionKind::FillInBlank {
                correct_text: String::new(),
                case_sensitive: false,
            },
            QuestionKind::Ordering {
                correct_order: vec![],
            },
        ];
        for kind in &kinds {
            assert!(AnswerState::unset(kind).fits(kind), "{kind}");
        }
        let choice = AnswerState::Choice { selected: None };
        assert!(!choice.fits(&QuestionKind::Matching { pairs: vec![] }));
    }

    #[test]
    fn tags_cover_known_types() {
        let tf = QuestionKind::TrueFalse {
            options: true_false_options(),
            correct_index: 0,
        };
        assert!(KNOWN_QUESTION_TYPES.contains(&tf.tag()));
        assert_eq!(tf.to_string(), "trueFalse");
    }
}
