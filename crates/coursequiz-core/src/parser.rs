//! Quiz content decoder.
//!
//! Decodes the JSON `content` of a quiz element into a [`QuizDefinition`],
//! and validates definitions for authoring mistakes.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::error::QuizError;
use crate::model::{Question, QuestionKind, QuizDefinition, KNOWN_QUESTION_TYPES};

/// Decode raw quiz content of shape `{"questions": [...]}`.
///
/// The whole quiz is rejected if any single question fails to decode.
pub fn decode_quiz(content: &str) -> Result<QuizDefinition, QuizError> {
    let root: Value = serde_json::from_str(content)
        .map_err(|e| QuizError::decode(format!("invalid JSON: {e}")))?;

    let raw_questions = root
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| QuizError::decode("missing `questions` array"))?;

    let questions = raw_questions
        .iter()
        .enumerate()
        .map(|(index, raw)| decode_question(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("decoded quiz with {} questions", questions.len());
    Ok(QuizDefinition::new(questions))
}

fn decode_question(index: usize, raw: &Value) -> Result<Question, QuizError> {
    let tag = raw.get("questionType").and_then(Value::as_str);
    match tag {
        Some(tag) if KNOWN_QUESTION_TYPES.contains(&tag) => {}
        other => {
            return Err(QuizError::InvalidQuestionVariant {
                index,
                tag: other.unwrap_or("<missing>").to_string(),
            });
        }
    }

    let mut question = Question::deserialize(raw)
        .map_err(|e| QuizError::decode(format!("question {index}: {e}")))?;
    if question.id.trim().is_empty() {
        question.id = format!("q{}", index + 1);
    }
    Ok(question)
}

/// Course element types that can wrap content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Article,
    Video,
    FunFact,
    Quiz,
    Question,
}

impl ElementType {
    fn as_str(&self) -> &'static str {
        match self {
            ElementType::Article => "article",
            ElementType::Video => "video",
            ElementType::FunFact => "funFact",
            ElementType::Quiz => "quiz",
            ElementType::Question => "question",
        }
    }
}

/// A course element as delivered by the course store.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseElement {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: i64,
}

/// Decode a whole course element and, if it is a quiz, its content.
pub fn decode_element(json: &str) -> Result<(CourseElement, QuizDefinition), QuizError> {
    let element: CourseElement = serde_json::from_str(json)
        .map_err(|e| QuizError::decode(format!("invalid course element: {e}")))?;

    if element.element_type != ElementType::Quiz {
        return Err(QuizError::NotAQuizElement {
            element_type: element.element_type.as_str().to_string(),
        });
    }

    let definition = decode_quiz(&element.content)?;
    Ok((element, definition))
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn for_question(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate a quiz definition for common authoring issues.
pub fn validate_quiz(quiz: &QuizDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for question in quiz.iter() {
        if !seen_ids.insert(question.id.as_str()) {
            warnings.push(ValidationWarning::for_question(
                question,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in quiz.iter() {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::for_question(question, "question text is empty"));
        }
        validate_kind(question, &mut warnings);
    }

    warnings
}

fn validate_kind(question: &Question, warnings: &mut Vec<ValidationWarning>) {
    let mut warn = |message: String| warnings.push(ValidationWarning::for_question(question, message));

    match &question.kind {
        QuestionKind::MultipleChoice {
            options,
            correct_index,
        } => {
            if options.len() < 2 {
                warn(format!("needs at least 2 options, found {}", options.len()));
            }
            if *correct_index >= options.len() {
                warn(format!("correct answer {correct_index} is out of range"));
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                warn("has an empty option".into());
            }
        }
        QuestionKind::TrueFalse {
            options,
            correct_index,
        } => {
            if options.len() != 2 {
                warn(format!("true/false needs exactly 2 options, found {}", options.len()));
            }
            if *correct_index > 1 {
                warn(format!("correct answer {correct_index} must be 0 or 1"));
            }
        }
        QuestionKind::MultiSelect {
            options,
            correct_indices,
        } => {
            if options.len() < 2 {
                warn(format!("needs at least 2 options, found {}", options.len()));
            }
            if correct_indices.is_empty() {
                warn("has no correct answers".into());
            }
            if let Some(bad) = correct_indices.iter().find(|&&i| i >= options.len()) {
                warn(format!("correct answer {bad} is out of range"));
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                warn("has an empty option".into());
            }
        }
        QuestionKind::Matching { pairs } => {
            if pairs.len() < 2 {
                warn(format!("needs at least 2 pairs, found {}", pairs.len()));
            }
            if pairs
                .iter()
                .any(|p| p.left.trim().is_empty() || p.right.trim().is_empty())
            {
                warn("has an empty pair side".into());
            }
        }
        QuestionKind::FillInBlank { correct_text, .. } => {
            if correct_text.trim().is_empty() {
                warn("correct text is empty".into());
            }
        }
        QuestionKind::Ordering { correct_order } => {
            if correct_order.len() < 2 {
                warn(format!("needs at least 2 items, found {}", correct_order.len()));
            }
            if correct_order.iter().any(|item| item.trim().is_empty()) {
                warn("has an empty item".into());
            }
        }
    }
}
