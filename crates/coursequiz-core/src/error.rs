//! Engine error types.
//!
//! Decode failures reject a whole quiz; action and precondition failures are
//! reported per call. None of them are retried: the engine does no I/O.

use thiserror::Error;

/// Errors produced by the quiz engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The raw content is not valid JSON or has no `questions` array.
    #[error("failed to decode quiz content: {reason}")]
    ContentDecode { reason: String },

    /// A question's `questionType` is not one of the six known kinds.
    #[error("question {index} has unknown questionType '{tag}'")]
    InvalidQuestionVariant { index: usize, tag: String },

    /// A course element wrapper that does not hold a quiz.
    #[error("course element of type '{element_type}' is not a quiz")]
    NotAQuizElement { element_type: String },

    /// A session needs at least one question.
    #[error("quiz has no questions")]
    EmptyQuiz,

    /// A host action that does not fit the question it targets.
    #[error("invalid action for question '{question_id}': {reason}")]
    InvalidAction { question_id: String, reason: String },

    /// An evaluator or recorder call whose precondition does not hold.
    /// Indicates a caller bug.
    #[error("precondition violated: {context}")]
    PreconditionViolation { context: String },
}

impl QuizError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        QuizError::ContentDecode {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_action(question_id: &str, reason: impl Into<String>) -> Self {
        QuizError::InvalidAction {
            question_id: question_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Build a precondition violation and log it; these must never pass silently.
    pub(crate) fn precondition(context: impl Into<String>) -> Self {
        let context = context.into();
        tracing::error!("precondition violated: {context}");
        QuizError::PreconditionViolation { context }
    }

    /// Returns `true` if this error rejects the quiz content as a whole.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            QuizError::ContentDecode { .. }
                | QuizError::InvalidQuestionVariant { .. }
                | QuizError::NotAQuizElement { .. }
        )
    }
}
