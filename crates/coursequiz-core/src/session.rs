//! Session controller: navigation, completion, retake and reentry.
//!
//! The controller owns the quiz definition and the current [`Session`]. A
//! session is never patched back to a clean state; retake and reentry replace
//! it wholesale with a fresh one.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::evaluator::{self, Grade};
use crate::model::{AnswerState, Question, QuizDefinition};
use crate::parser::decode_quiz;
use crate::recorder::{self, Action, Recorded};
use crate::report::Completion;
use crate::shuffle::{initialize_display, DisplayShuffle, RngShuffler};
use crate::statistics::ScoreSummary;
use crate::traits::{NoopObserver, RestartReason, SessionObserver, Shuffler};

/// Configuration for the session controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Treat an ordering question as answered only after the learner has
    /// moved at least one item. Off by default: an arranged ordering question
    /// counts as answered straight away.
    pub ordering_requires_move: bool,
}

/// The complete mutable state of one quiz attempt.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    current_index: usize,
    answers: Vec<AnswerState>,
    displays: Vec<Option<DisplayShuffle>>,
    completion: Option<Completion>,
}

impl Session {
    fn fresh(definition: &QuizDefinition) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            current_index: 0,
            answers: definition
                .iter()
                .map(|q| AnswerState::unset(&q.kind))
                .collect(),
            displays: vec![None; definition.len()],
            completion: None,
        }
    }

    /// Attempt identifier, new for every fresh session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &[AnswerState] {
        &self.answers
    }

    pub fn answer(&self, index: usize) -> Option<&AnswerState> {
        self.answers.get(index)
    }

    /// Display shuffle for a question, once it has been shown.
    pub fn display(&self, index: usize) -> Option<&DisplayShuffle> {
        self.displays.get(index).and_then(Option::as_ref)
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }
}

/// Result of a navigation or lifecycle request.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The current question changed.
    Moved { index: usize },
    /// The last question was submitted.
    Completed(Completion),
    /// A fresh session replaced the previous one.
    Restarted,
    /// The current question must be answered first.
    Blocked,
    /// Nothing to do in the current state.
    Unchanged,
}

/// Owns the quiz definition and drives its session state machine.
pub struct QuizController<S = RngShuffler<StdRng>> {
    definition: QuizDefinition,
    session: Session,
    shuffler: S,
    config: SessionConfig,
    observer: Box<dyn SessionObserver>,
}

impl QuizController {
    /// Decode raw quiz content and start a session with an entropy-seeded shuffler.
    pub fn from_content(content: &str) -> Result<Self, QuizError> {
        let definition = decode_quiz(content)?;
        Self::new(definition, RngShuffler::from_entropy())
    }
}

impl<S: Shuffler> QuizController<S> {
    pub fn new(definition: QuizDefinition, shuffler: S) -> Result<Self, QuizError> {
        Self::with_options(
            definition,
            shuffler,
            SessionConfig::default(),
            Box::new(NoopObserver),
        )
    }

    /// Start a session with an explicit config and observer.
    pub fn with_options(
        definition: QuizDefinition,
        shuffler: S,
        config: SessionConfig,
        observer: Box<dyn SessionObserver>,
    ) -> Result<Self, QuizError> {
        if definition.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }

        let session = Session::fresh(&definition);
        tracing::debug!(
            "starting session {} over {} questions",
            session.id,
            definition.len()
        );
        let mut controller = Self {
            definition,
            session,
            shuffler,
            config,
            observer,
        };
        controller.enter(0);
        Ok(controller)
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.definition.len()
    }

    /// Always `false`: a controller cannot be built over an empty quiz.
    pub fn is_empty(&self) -> bool {
        self.definition.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.definition.questions()[self.session.current_index]
    }

    pub fn current_answer(&self) -> &AnswerState {
        &self.session.answers[self.session.current_index]
    }

    pub fn current_display(&self) -> Option<&DisplayShuffle> {
        self.session.display(self.session.current_index)
    }

    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.session.completion()
    }

    /// Whether the current question may be submitted.
    pub fn is_current_answered(&self) -> Result<bool, QuizError> {
        self.answered(self.session.current_index)
    }

    /// Feedback for the current question: `None` until it is answered.
    pub fn current_feedback(&self) -> Result<Option<bool>, QuizError> {
        match self.grade_at(self.session.current_index)? {
            Grade::Unanswered => Ok(None),
            grade => Ok(Some(grade.is_correct())),
        }
    }

    /// How many questions currently hold an answer.
    pub fn answered_count(&self) -> Result<usize, QuizError> {
        let mut count = 0;
        for index in 0..self.definition.len() {
            if self.answered(index)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Apply a learner action to the current question.
    pub fn record(&mut self, action: Action) -> Result<Recorded, QuizError> {
        if self.session.is_completed() {
            return Ok(Recorded::Locked);
        }
        let index = self.session.current_index;
        let question = &self.definition.questions()[index];
        recorder::apply(
            question,
            &mut self.session.answers[index],
            &mut self.session.displays[index],
            action,
            &mut self.shuffler,
        )
    }

    /// Match `left` to the right item shown at display `position`.
    pub fn pair_displayed(&mut self, left: usize, position: usize) -> Result<Recorded, QuizError> {
        let right = self
            .current_display()
            .and_then(|display| display.right_original_index(position))
            .ok_or_else(|| {
                QuizError::invalid_action(
                    &self.current_question().id,
                    format!("no right item at position {position}"),
                )
            })?;
        self.record(Action::Pair { left, right })
    }

    /// Submit the current question and advance, completing on the last one.
    pub fn next(&mut self) -> Result<Transition, QuizError> {
        if self.session.is_completed() {
            return Ok(Transition::Unchanged);
        }
        if !self.is_current_answered()? {
            return Ok(Transition::Blocked);
        }

        let index = self.session.current_index;
        if index + 1 < self.definition.len() {
            self.enter(index + 1);
            return Ok(Transition::Moved { index: index + 1 });
        }

        let grades = self.grades()?;
        let completion = Completion::new(
            self.session.id,
            self.session.started_at,
            &self.definition,
            &grades,
        );
        tracing::info!(
            "session {} completed with score {}% ({}/{})",
            self.session.id,
            completion.summary.score,
            completion.summary.correct,
            completion.summary.total
        );
        self.observer.on_completed(&completion);
        self.session.completion = Some(completion.clone());
        Ok(Transition::Completed(completion))
    }

    /// Go back one question. No-op on the first question.
    pub fn previous(&mut self) -> Transition {
        let index = self.session.current_index;
        if self.session.is_completed() || index == 0 {
            return Transition::Unchanged;
        }
        self.enter(index - 1);
        Transition::Moved { index: index - 1 }
    }

    /// Start a fresh attempt after completion.
    pub fn retake(&mut self) -> Transition {
        if !self.session.is_completed() {
            return Transition::Unchanged;
        }
        self.restart(RestartReason::Retake)
    }

    /// The hosting view regained focus: always start over.
    pub fn on_reentry(&mut self) -> Transition {
        self.restart(RestartReason::Reentry)
    }

    /// Score the current answers; unanswered questions count as incorrect.
    pub fn compute_score(&self) -> Result<ScoreSummary, QuizError> {
        Ok(ScoreSummary::from_grades(&self.grades()?))
    }

    fn restart(&mut self, reason: RestartReason) -> Transition {
        let previous = self.session.id;
        self.session = Session::fresh(&self.definition);
        tracing::info!(
            "session {previous} replaced by {} ({reason:?})",
            self.session.id
        );
        self.observer.on_restarted(reason);
        self.enter(0);
        Transition::Restarted
    }

    /// Make `index` current, creating its display shuffle on first visit.
    fn enter(&mut self, index: usize) {
        self.session.current_index = index;
        let question = &self.definition.questions()[index];

        let slot = &mut self.session.displays[index];
        let existing = slot.take();
        *slot = initialize_display(question, existing, &mut self.shuffler);

        if let (Some(DisplayShuffle::Ordering(items)), AnswerState::Ordering { order, .. }) =
            (slot.as_ref(), &mut self.session.answers[index])
        {
            if order.is_none() {
                *order = Some(items.clone());
            }
        }

        tracing::debug!("entered question {} ('{}')", index, question.id);
        self.observer.on_question_entered(index, question);
    }

    fn answered(&self, index: usize) -> Result<bool, QuizError> {
        let question = &self.definition.questions()[index];
        let state = &self.session.answers[index];
        let answered = evaluator::is_answered(question, state)?;
        match state {
            AnswerState::Ordering { moves, .. } if self.config.ordering_requires_move => {
                Ok(answered && *moves > 0)
            }
            _ => Ok(answered),
        }
    }

    fn grade_at(&self, index: usize) -> Result<Grade, QuizError> {
        if !self.answered(index)? {
            return Ok(Grade::Unanswered);
        }
        evaluator::grade(
            &self.definition.questions()[index],
            &self.session.answers[index],
        )
    }

    fn grades(&self) -> Result<Vec<Grade>, QuizError> {
        (0..self.definition.len())
            .map(|index| self.grade_at(index))
            .collect()
    }
}
