//! Answer recording: apply one learner action to a question's answer state.
//!
//! Every kind except ordering stops accepting changes once it is answered.
//! Ordering stays movable for as long as the question is shown.

use crate::error::QuizError;
use crate::evaluator::is_answered;
use crate::model::{AnswerState, Question, QuestionKind};
use crate::shuffle::{shuffle_matching, DisplayShuffle};
use crate::traits::Shuffler;

/// Direction of an ordering move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A learner action dispatched by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Multiple choice / true-false selection.
    Select(usize),
    /// Multi-select toggle.
    Toggle(usize),
    /// Match `left` to the pair whose original index is `right`.
    Pair { left: usize, right: usize },
    /// Clear all matches and reshuffle the right column.
    ResetMatching,
    /// Replace the fill-in-the-blank text.
    SetText(String),
    /// Swap an ordering item with its neighbour.
    Move { index: usize, direction: Direction },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Select(_) => "select",
            Action::Toggle(_) => "toggle",
            Action::Pair { .. } => "pair",
            Action::ResetMatching => "reset",
            Action::SetText(_) => "set text",
            Action::Move { .. } => "move",
        }
    }
}

/// What happened to the answer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// The state changed.
    Applied,
    /// Valid action with no effect (ordering move at a boundary).
    Unchanged,
    /// The question is already answered and no longer accepts input.
    Locked,
}

/// Apply `action` to the question's state and display shuffle.
pub fn apply(
    question: &Question,
    state: &mut AnswerState,
    display: &mut Option<DisplayShuffle>,
    action: Action,
    shuffler: &mut dyn Shuffler,
) -> Result<Recorded, QuizError> {
    if !state.fits(&question.kind) {
        return Err(unfit(question));
    }
    let name = action.name();
    let recorded = match action {
        Action::Select(index) => select(question, state, index),
        Action::Toggle(index) => toggle(question, state, index),
        Action::Pair { left, right } => pair(question, state, left, right),
        Action::ResetMatching => reset_matching(question, state, display, shuffler),
        Action::SetText(text) => set_text(question, state, text),
        Action::Move { index, direction } => move_adjacent(question, state, index, direction),
    }?;
    tracing::debug!("{name} on question '{}': {recorded:?}", question.id);
    Ok(recorded)
}

/// Select an option, replacing any prior selection.
pub fn select(
    question: &Question,
    state: &mut AnswerState,
    index: usize,
) -> Result<Recorded, QuizError> {
    let (QuestionKind::MultipleChoice { options, .. } | QuestionKind::TrueFalse { options, .. }) =
        &question.kind
    else {
        return Err(wrong_kind(question, "select"));
    };
    if is_answered(question, state)? {
        return Ok(Recorded::Locked);
    }
    check_index(question, "option", index, options.len())?;

    let AnswerState::Choice { selected } = state else {
        return Err(unfit(question));
    };
    *selected = Some(index);
    Ok(Recorded::Applied)
}

/// Add the option if absent, remove it if present.
pub fn toggle(
    question: &Question,
    state: &mut AnswerState,
    index: usize,
) -> Result<Recorded, QuizError> {
    let QuestionKind::MultiSelect { options, .. } = &question.kind else {
        return Err(wrong_kind(question, "toggle"));
    };
    if is_answered(question, state)? {
        return Ok(Recorded::Locked);
    }
    check_index(question, "option", index, options.len())?;

    let AnswerState::MultiSelect { selected } = state else {
        return Err(unfit(question));
    };
    if !selected.remove(&index) {
        selected.insert(index);
    }
    Ok(Recorded::Applied)
}

/// Map `left` to the right item with original index `right`.
///
/// Overwrites any previous match for `left`. Several lefts may point at the
/// same right item; only evaluation penalizes that.
pub fn pair(
    question: &Question,
    state: &mut AnswerState,
    left: usize,
    right: usize,
) -> Result<Recorded, QuizError> {
    let QuestionKind::Matching { pairs } = &question.kind else {
        return Err(wrong_kind(question, "pair"));
    };
    if is_answered(question, state)? {
        return Ok(Recorded::Locked);
    }
    check_index(question, "left item", left, pairs.len())?;
    check_index(question, "right item", right, pairs.len())?;

    let AnswerState::Matching { pairs: mapping } = state else {
        return Err(unfit(question));
    };
    mapping.insert(left, right);
    Ok(Recorded::Applied)
}

/// Clear every match and reshuffle the right column.
pub fn reset_matching(
    question: &Question,
    state: &mut AnswerState,
    display: &mut Option<DisplayShuffle>,
    shuffler: &mut dyn Shuffler,
) -> Result<Recorded, QuizError> {
    let QuestionKind::Matching { pairs } = &question.kind else {
        return Err(wrong_kind(question, "reset"));
    };
    if is_answered(question, state)? {
        return Ok(Recorded::Locked);
    }

    let AnswerState::Matching { pairs: mapping } = state else {
        return Err(unfit(question));
    };
    mapping.clear();
    *display = Some(shuffle_matching(pairs, shuffler));
    Ok(Recorded::Applied)
}

/// Replace the current text verbatim.
pub fn set_text(
    question: &Question,
    state: &mut AnswerState,
    text: String,
) -> Result<Recorded, QuizError> {
    if !matches!(question.kind, QuestionKind::FillInBlank { .. }) {
        return Err(wrong_kind(question, "set text"));
    }
    if is_answered(question, state)? {
        return Ok(Recorded::Locked);
    }

    let AnswerState::FillInBlank { text: current } = state else {
        return Err(unfit(question));
    };
    *current = Some(text);
    Ok(Recorded::Applied)
}

/// Swap the item at `index` with its neighbour in `direction`.
///
/// Moving the first item up or the last item down does nothing.
pub fn move_adjacent(
    question: &Question,
    state: &mut AnswerState,
    index: usize,
    direction: Direction,
) -> Result<Recorded, QuizError> {
    if !matches!(question.kind, QuestionKind::Ordering { .. }) {
        return Err(wrong_kind(question, "move"));
    }
    let AnswerState::Ordering { order, moves } = state else {
        return Err(unfit(question));
    };
    let Some(items) = order.as_mut() else {
        return Err(QuizError::precondition(format!(
            "ordering question '{}' moved before it was arranged",
            question.id
        )));
    };
    check_index(question, "item", index, items.len())?;

    let target = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < items.len() => index + 1,
        _ => return Ok(Recorded::Unchanged),
    };
    items.swap(index, target);
    *moves += 1;
    Ok(Recorded::Applied)
}

fn wrong_kind(question: &Question, action: &str) -> QuizError {
    QuizError::invalid_action(
        &question.id,
        format!("cannot {action} on a {} question", question.kind),
    )
}

fn unfit(question: &Question) -> QuizError {
    QuizError::precondition(format!(
        "answer state does not fit {} question '{}'",
        question.kind, question.id
    ))
}

fn check_index(question: &Question, what: &str, index: usize, len: usize) -> Result<(), QuizError> {
    if index < len {
        Ok(())
    } else {
        Err(QuizError::invalid_action(
            &question.id,
            format!("{what} {index} is out of range (0..{len})"),
        ))
    }
}
