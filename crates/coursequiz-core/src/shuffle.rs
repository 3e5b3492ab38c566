//! Display shuffles for matching and ordering questions.
//!
//! A shuffle is generated once per question per session and then reused, so
//! the arrangement stays put while the learner works on it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::model::{MatchPair, Question, QuestionKind};
use crate::traits::{is_permutation, Shuffler};

/// One displayed row of a matching question's right column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingEntry {
    /// Index of the pair this entry came from.
    pub original_index: usize,
    pub left: String,
    pub right: String,
}

/// Session-stable arrangement for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DisplayShuffle {
    /// Permuted pairs, each tagged with its original index.
    Matching(Vec<MatchingEntry>),
    /// Permuted item values, the initial candidate sequence.
    Ordering(Vec<String>),
}

impl DisplayShuffle {
    /// Original pair index of the right item shown at `position`.
    pub fn right_original_index(&self, position: usize) -> Option<usize> {
        match self {
            DisplayShuffle::Matching(entries) => entries.get(position).map(|e| e.original_index),
            DisplayShuffle::Ordering(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DisplayShuffle::Matching(entries) => entries.len(),
            DisplayShuffle::Ordering(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Produce the display shuffle for `question`, reusing `existing` if present.
///
/// Returns `None` for kinds that are not shuffled.
pub fn initialize_display(
    question: &Question,
    existing: Option<DisplayShuffle>,
    shuffler: &mut dyn Shuffler,
) -> Option<DisplayShuffle> {
    if existing.is_some() || !question.kind.needs_shuffle() {
        return existing;
    }

    let shuffle = match &question.kind {
        QuestionKind::Matching { pairs } => shuffle_matching(pairs, shuffler),
        QuestionKind::Ordering { correct_order } => {
            DisplayShuffle::Ordering(permuted(correct_order, shuffler))
        }
        _ => return None,
    };
    tracing::debug!(
        "generated {} shuffle of {} items for question '{}'",
        question.kind,
        shuffle.len(),
        question.id
    );
    Some(shuffle)
}

/// Shuffle the pairs of a matching question.
pub(crate) fn shuffle_matching(pairs: &[MatchPair], shuffler: &mut dyn Shuffler) -> DisplayShuffle {
    let entries = checked_permutation(pairs.len(), shuffler)
        .into_iter()
        .map(|i| MatchingEntry {
            original_index: i,
            left: pairs[i].left.clone(),
            right: pairs[i].right.clone(),
        })
        .collect();
    DisplayShuffle::Matching(entries)
}

fn permuted(items: &[String], shuffler: &mut dyn Shuffler) -> Vec<String> {
    checked_permutation(items.len(), shuffler)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

fn checked_permutation(len: usize, shuffler: &mut dyn Shuffler) -> Vec<usize> {
    let permutation = shuffler.permutation(len);
    if is_permutation(&permutation, len) {
        permutation
    } else {
        tracing::warn!("shuffler returned an invalid permutation of {len}, using identity");
        (0..len).collect()
    }
}

/// Uniform Fisher-Yates shuffler over any `rand` generator.
pub struct RngShuffler<R> {
    rng: R,
}

impl<R: Rng> RngShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngShuffler<StdRng> {
    /// Shuffler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic shuffler for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}
