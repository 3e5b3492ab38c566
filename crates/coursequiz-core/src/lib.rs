//! coursequiz-core: Quiz assessment engine for in-course quizzes.
//!
//! This crate defines the question model, content decoding, display
//! shuffles, answer recording, evaluation, scoring, and the session
//! controller that drives a learner through one attempt.

pub mod error;
pub mod evaluator;
pub mod mock;
pub mod model;
pub mod parser;
pub mod recorder;
pub mod report;
pub mod session;
pub mod shuffle;
pub mod statistics;
pub mod traits;

pub use error::QuizError;
pub use model::{AnswerState, Question, QuestionKind, QuizDefinition};
pub use session::{QuizController, SessionConfig, Transition};
