//! Core trait definitions for the engine's seams.
//!
//! Randomness and host notifications are injected so hosts and tests can
//! control them.

use crate::model::Question;
use crate::report::Completion;

// ---------------------------------------------------------------------------
// Randomness source
// ---------------------------------------------------------------------------

/// Source of display permutations.
pub trait Shuffler {
    /// Return a permutation of `0..len`.
    ///
    /// Entry `i` is the canonical index shown at display position `i`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

impl<S: Shuffler + ?Sized> Shuffler for &mut S {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (**self).permutation(len)
    }
}

impl<S: Shuffler + ?Sized> Shuffler for Box<S> {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (**self).permutation(len)
    }
}

/// Returns `true` if `candidate` is a permutation of `0..len`.
pub fn is_permutation(candidate: &[usize], len: usize) -> bool {
    if candidate.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in candidate {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

// ---------------------------------------------------------------------------
// Host notifications
// ---------------------------------------------------------------------------

/// Why a session was replaced with a fresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartReason {
    /// Explicit retake after completion.
    Retake,
    /// The hosting view regained focus.
    Reentry,
}

/// Session event reporting trait.
pub trait SessionObserver {
    fn on_question_entered(&self, index: usize, question: &Question);
    fn on_completed(&self, completion: &Completion);
    fn on_restarted(&self, reason: RestartReason);
}

/// No-op session observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_question_entered(&self, _: usize, _: &Question) {}
    fn on_completed(&self, _: &Completion) {}
    fn on_restarted(&self, _: RestartReason) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }
}
