//! Scripted shuffler for testing.

use std::collections::VecDeque;

use crate::traits::{is_permutation, Shuffler};

/// A shuffler that replays queued permutations.
///
/// Once the queue is exhausted, or when a queued entry does not fit the
/// requested length, it returns the identity permutation.
#[derive(Debug, Default)]
pub struct ScriptedShuffler {
    /// Permutations still to be handed out.
    queue: VecDeque<Vec<usize>>,
    /// Number of permutations requested.
    call_count: usize,
}

impl ScriptedShuffler {
    /// Create a shuffler that hands out `permutations` in order.
    pub fn new(permutations: Vec<Vec<usize>>) -> Self {
        Self {
            queue: permutations.into(),
            call_count: 0,
        }
    }

    /// A shuffler that never reorders anything.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Get the number of permutations requested so far.
    pub fn call_count(&self) -> usize {
        self.call_count
    }
}

impl Shuffler for ScriptedShuffler {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        self.call_count += 1;
        match self.queue.pop_front() {
            Some(permutation) if is_permutation(&permutation, len) => permutation,
            Some(permutation) => {
                tracing::warn!(
                    "scripted permutation {permutation:?} does not fit length {len}, using identity"
                );
                (0..len).collect()
            }
            None => (0..len).collect(),
        }
    }
}
