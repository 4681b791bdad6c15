// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Moves: cheap evaluation, mutating application.
//!
//! A move is a token describing one step from a solution to a neighbor. The
//! contract splits pricing from mutation: `evaluate` returns the full
//! objective value the solution *would* have after the move, without
//! touching the solution, and `apply` performs the mutation. The split lets
//! engines rank an entire neighborhood without constructing candidate
//! solutions; after `apply`, the solution's objective value equals what
//! `evaluate` promised (up to the problem's numeric tolerance).
//!
//! Moves destined for tabu memory additionally implement `TabuMove`, which
//! requires value semantics (`Clone`, `Eq`, `Hash` — the hash must agree
//! with equality, which a derive guarantees) and offers an `opposite_of`
//! hook. By default a move is its own opposite, so the memory forbids
//! repeating the last move; overriding `opposite_of` instead forbids
//! *undoing* it (if `a -> b` was made, `b -> a` becomes tabu).
//!
//! Two canonical permutation moves are provided: `SwapElements` exchanges
//! two positions, and `InvertSubsequence` reverses a (circular) slice of the
//! permutation.

use crate::permutation::Permutation;
use crate::solution::Evaluable;
use std::hash::Hash;

/// A transformation from a solution to one of its neighbors.
pub trait Move<S>
where
    S: Evaluable,
{
    /// Returns the objective value `solution` would have after this move.
    ///
    /// This is the full post-move cost, not the delta. Must not mutate the
    /// solution.
    fn evaluate(&self, solution: &S) -> S::Cost;

    /// Applies this move to `solution`.
    fn apply(&self, solution: &mut S);
}

/// A move that can be stored in tabu memory.
///
/// The memory stores independent clones and tests membership by equality
/// under the hash, so `Hash` must be consistent with `Eq`.
pub trait TabuMove: Clone + Eq + Hash {
    /// Returns the move whose recording should forbid this move.
    ///
    /// Defaults to a clone of `self`, which makes the last *made* move tabu.
    /// Override to return the reverse move instead, making the *undo* tabu.
    #[inline]
    fn opposite_of(&self) -> Self {
        self.clone()
    }
}

/// A move that swaps two positions of a permutation.
///
/// The two indices are stored in normalized order, so `SwapElements::new(3, 1)`
/// and `SwapElements::new(1, 3)` are equal and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapElements {
    first: usize,
    second: usize,
}

impl SwapElements {
    /// Creates a move that swaps positions `from` and `to`.
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            first: from.min(to),
            second: from.max(to),
        }
    }

    /// Re-aims this move at positions `from` and `to`.
    ///
    /// Stochastic neighborhoods use this to reuse their owned tokens across
    /// refreshes instead of reallocating.
    #[inline]
    pub fn change(&mut self, from: usize, to: usize) {
        self.first = from.min(to);
        self.second = from.max(to);
    }

    /// The smaller of the two swapped positions.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// The larger of the two swapped positions.
    #[inline]
    pub fn second(&self) -> usize {
        self.second
    }
}

impl<S> Move<S> for SwapElements
where
    S: Permutation,
{
    #[inline]
    fn evaluate(&self, solution: &S) -> S::Cost {
        solution.objective_value() + solution.evaluate_swap(self.first, self.second)
    }

    #[inline]
    fn apply(&self, solution: &mut S) {
        solution.apply_swap(self.first, self.second);
    }
}

// A swap is its own inverse, so the default opposite is exact.
impl TabuMove for SwapElements {}

/// A move that reverses the circular subsequence running from position
/// `from` forward to position `to`.
///
/// When `from < to` this reverses the contiguous slice `[from, to]`; when
/// `from > to` the reversed segment wraps around the end of the
/// permutation. The two endpoints must differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvertSubsequence {
    from: usize,
    to: usize,
}

impl InvertSubsequence {
    /// Creates a move that reverses the segment from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if `from == to`.
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        assert!(
            from != to,
            "called `InvertSubsequence::new()` with equal endpoints {}, but the segment must span at least 2 positions",
            from
        );

        Self { from, to }
    }

    /// Re-aims this move at the segment from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if `from == to`.
    #[inline]
    pub fn change(&mut self, from: usize, to: usize) {
        assert!(
            from != to,
            "called `InvertSubsequence::change()` with equal endpoints {}, but the segment must span at least 2 positions",
            from
        );

        self.from = from;
        self.to = to;
    }

    /// The first position of the reversed segment.
    #[inline]
    pub fn from(&self) -> usize {
        self.from
    }

    /// The last position of the reversed segment.
    #[inline]
    pub fn to(&self) -> usize {
        self.to
    }

    // The pairs of positions exchanged when reversing the segment, walking
    // inward from both ends of the (possibly wrapping) slice.
    fn swap_pairs(&self, size: usize) -> impl Iterator<Item = (usize, usize)> {
        let span = if self.from < self.to {
            self.to - self.from + 1
        } else {
            size + self.to - self.from + 1
        };
        let from = self.from;
        let to = self.to;
        (0..span / 2).map(move |step| ((from + step) % size, (size + to - step) % size))
    }
}

impl<S> Move<S> for InvertSubsequence
where
    S: Permutation + Clone,
{
    fn evaluate(&self, solution: &S) -> S::Cost {
        // The swaps of the reversal depend on each other, so the exact
        // post-move cost is priced on a scratch copy driven through the
        // incremental path.
        let mut scratch = solution.clone();
        self.apply(&mut scratch);
        scratch.objective_value()
    }

    fn apply(&self, solution: &mut S) {
        for (a, b) in self.swap_pairs(solution.len()) {
            solution.apply_swap(a, b);
        }
    }
}

// Reversing the same segment again restores the original order, so the
// default opposite is exact here as well.
impl TabuMove for InvertSubsequence {}
