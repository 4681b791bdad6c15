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

//! Neighborhood generation through move managers.
//!
//! A move manager owns the candidate moves of the current iteration and
//! hands them to the engine as a slice, so iteration order is stable between
//! one `refresh` and the next and no tokens change owner. Engines call
//! `refresh` exactly once per iteration before scanning candidates; a
//! constant neighborhood implements it as a no-op, while a stochastic one
//! re-parameterizes its owned tokens in place.
//!
//! Provided managers:
//! - `SwapFullNeighborhood`: every unordered position pair `i < j`, in
//!   lexicographic order; static.
//! - `InvertFullNeighborhood`: every ordered pair `i != j` of segment
//!   endpoints; static.
//! - `StochasticSwapNeighborhood`: `k` uniformly random distinct-position
//!   swaps, redrawn on every refresh from an injected PRNG.

use crate::moves::{InvertSubsequence, Move, SwapElements};
use crate::permutation::Permutation;
use crate::solution::Evaluable;
use rand::Rng;

/// Owner and supplier of the candidate moves for one search iteration.
pub trait MoveManager<S>
where
    S: Evaluable,
{
    /// The type of move this manager produces.
    type Move: Move<S>;

    /// Re-populates or re-parameterizes the candidate moves for the current
    /// solution. Called exactly once per engine iteration, before candidate
    /// iteration begins.
    fn refresh(&mut self, solution: &S);

    /// The candidate moves of the current iteration, in a stable order.
    fn moves(&self) -> &[Self::Move];

    /// The number of candidate moves currently offered.
    #[inline]
    fn size(&self) -> usize {
        self.moves().len()
    }
}

/// The complete swap neighborhood of a permutation of fixed size.
///
/// Enumerates all pairs `(i, j)` with `0 <= i < j < n` in lexicographic
/// order, `n * (n - 1) / 2` moves in total. The neighborhood is constant, so
/// `refresh` is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapFullNeighborhood {
    moves: Vec<SwapElements>,
}

impl SwapFullNeighborhood {
    /// Creates the full swap neighborhood for permutations of `size`
    /// elements.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn new(size: usize) -> Self {
        assert!(
            size >= 2,
            "called `SwapFullNeighborhood::new()` with size {}, but swap neighborhoods need at least 2 elements",
            size
        );

        let mut moves = Vec::with_capacity(size * (size - 1) / 2);
        for i in 0..size - 1 {
            for j in i + 1..size {
                moves.push(SwapElements::new(i, j));
            }
        }
        Self { moves }
    }
}

impl<S> MoveManager<S> for SwapFullNeighborhood
where
    S: Permutation,
{
    type Move = SwapElements;

    #[inline]
    fn refresh(&mut self, _solution: &S) {
        // Constant neighborhood.
    }

    #[inline]
    fn moves(&self) -> &[SwapElements] {
        &self.moves
    }
}

/// The complete subsequence-inversion neighborhood of a permutation.
///
/// Enumerates all ordered pairs `(i, j)` with `i != j`; the ordering matters
/// because segments wrap around the end of the permutation. The neighborhood
/// is constant, so `refresh` is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertFullNeighborhood {
    moves: Vec<InvertSubsequence>,
}

impl InvertFullNeighborhood {
    /// Creates the full inversion neighborhood for permutations of `size`
    /// elements.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn new(size: usize) -> Self {
        assert!(
            size >= 2,
            "called `InvertFullNeighborhood::new()` with size {}, but inversion neighborhoods need at least 2 elements",
            size
        );

        let mut moves = Vec::with_capacity(size * (size - 1));
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    moves.push(InvertSubsequence::new(i, j));
                }
            }
        }
        Self { moves }
    }
}

impl<S> MoveManager<S> for InvertFullNeighborhood
where
    S: Permutation + Clone,
{
    type Move = InvertSubsequence;

    #[inline]
    fn refresh(&mut self, _solution: &S) {
        // Constant neighborhood.
    }

    #[inline]
    fn moves(&self) -> &[InvertSubsequence] {
        &self.moves
    }
}

/// A stochastic swap neighborhood of fixed cardinality.
///
/// Owns `k` swap tokens and re-randomizes all of them on every `refresh`
/// with uniformly random distinct positions. The tokens are reused in place,
/// so callers must not assume move identity across refreshes.
#[derive(Debug, Clone)]
pub struct StochasticSwapNeighborhood<R>
where
    R: Rng,
{
    rng: R,
    moves: Vec<SwapElements>,
}

impl<R> StochasticSwapNeighborhood<R>
where
    R: Rng,
{
    /// Creates a stochastic neighborhood producing `count` random swaps per
    /// iteration, drawn from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is 0.
    pub fn new(rng: R, count: usize) -> Self {
        assert!(
            count > 0,
            "called `StochasticSwapNeighborhood::new()` with count 0, but the neighborhood must offer at least one move"
        );

        Self {
            rng,
            moves: vec![SwapElements::new(0, 0); count],
        }
    }
}

impl<S, R> MoveManager<S> for StochasticSwapNeighborhood<R>
where
    S: Permutation,
    R: Rng,
{
    type Move = SwapElements;

    fn refresh(&mut self, solution: &S) {
        let size = solution.len();
        assert!(
            size >= 2,
            "called `StochasticSwapNeighborhood::refresh()` with a solution of size {}, but swap neighborhoods need at least 2 elements",
            size
        );

        for mv in &mut self.moves {
            let p1 = self.rng.random_range(0..size);
            let mut p2 = self.rng.random_range(0..size);
            while p1 == p2 {
                p2 = self.rng.random_range(0..size);
            }
            mv.change(p1, p2);
        }
    }

    #[inline]
    fn moves(&self) -> &[SwapElements] {
        &self.moves
    }
}
