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

//! Permutation problem skeleton with incremental cost maintenance.
//!
//! Many combinatorial problems (assignment, quadratic assignment, tours)
//! search over permutations of `{0, .., n-1}`. This module provides a
//! ready-made solution type for that family: `PermutationSolution` holds the
//! permutation together with a cached objective value and keeps the cache
//! consistent through swaps by adding the problem-supplied delta instead of
//! recomputing from scratch.
//!
//! The problem-specific part is a `PermutationObjective`: it prices a whole
//! permutation and, crucially for performance, prices the *change* caused by
//! swapping two positions without materializing the swapped permutation.
//! Engines and moves address the solution through the `Permutation`
//! capability trait, so a custom solution type with its own storage can
//! participate in the same neighborhoods by implementing that trait.

use crate::num::CostValue;
use crate::solution::{CopyFrom, Evaluable};
use rand::Rng;
use rand::seq::SliceRandom;

/// A problem-specific objective over permutations of `{0, .., n-1}`.
///
/// Implementations must keep `full_cost` and `swap_delta` consistent: for
/// any permutation `pi` and indices `i`, `j`, pricing the swapped
/// permutation from scratch must equal `full_cost(pi) + swap_delta(pi, i, j)`
/// up to the numeric tolerance of the problem. The incremental cost cache of
/// `PermutationSolution` is only as good as that promise.
pub trait PermutationObjective {
    /// The numeric type of the objective value.
    type Cost: CostValue;

    /// Prices a complete permutation.
    fn full_cost(&self, permutation: &[usize]) -> Self::Cost;

    /// Returns the cost change caused by swapping positions `i` and `j` of
    /// `permutation`, without modifying it. Negative means improvement.
    fn swap_delta(&self, permutation: &[usize], i: usize, j: usize) -> Self::Cost;
}

/// Capability trait for solutions whose state is a permutation.
///
/// Moves and neighborhoods that transform permutations are generic over this
/// trait instead of a concrete solution type.
pub trait Permutation: Evaluable {
    /// The number of elements in the permutation.
    fn len(&self) -> usize;

    /// Returns `true` if the permutation has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element stored at `index`.
    fn element(&self, index: usize) -> usize;

    /// Returns the cost change a swap of positions `i` and `j` would cause,
    /// without performing it.
    fn evaluate_swap(&self, i: usize, j: usize) -> Self::Cost;

    /// Swaps positions `i` and `j` and updates the objective value.
    fn apply_swap(&mut self, i: usize, j: usize);
}

/// A permutation of `{0, .., n-1}` with a cached objective value.
///
/// The cache is maintained incrementally: `apply_swap` adds the delta priced
/// by the objective before mutating the permutation, so the cached value
/// matches a full recomputation at every observable point.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationSolution<E>
where
    E: PermutationObjective,
{
    objective: E,
    permutation: Vec<usize>,
    cached_cost: E::Cost,
}

impl<E> PermutationSolution<E>
where
    E: PermutationObjective,
{
    /// Creates a solution holding the identity permutation `[0, 1, .., n-1]`
    /// priced by `objective`.
    pub fn new(objective: E, n: usize) -> Self {
        let permutation: Vec<usize> = (0..n).collect();
        let cached_cost = objective.full_cost(&permutation);
        Self {
            objective,
            permutation,
            cached_cost,
        }
    }

    /// Creates a solution from an explicit permutation.
    ///
    /// # Panics
    ///
    /// Debug builds assert that `permutation` is a permutation of
    /// `{0, .., n-1}`.
    pub fn from_permutation(objective: E, permutation: Vec<usize>) -> Self {
        debug_assert!(
            {
                let mut seen = vec![false; permutation.len()];
                permutation.iter().all(|&p| {
                    p < seen.len() && !std::mem::replace(&mut seen[p], true)
                })
            },
            "called `PermutationSolution::from_permutation` with a sequence that is not a permutation: {:?}",
            permutation
        );

        let cached_cost = objective.full_cost(&permutation);
        Self {
            objective,
            permutation,
            cached_cost,
        }
    }

    /// Returns the permutation as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.permutation
    }

    /// Returns the problem-specific objective.
    #[inline]
    pub fn objective(&self) -> &E {
        &self.objective
    }

    /// Recomputes the objective value from scratch and stores it.
    ///
    /// Useful after bulk edits that bypass the incremental path.
    #[inline]
    pub fn update_cost(&mut self) {
        self.cached_cost = self.objective.full_cost(&self.permutation);
    }

    /// Randomizes the permutation and recomputes the cached cost.
    ///
    /// This is the usual way to generate a random starting point before a
    /// search.
    pub fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: Rng,
    {
        self.permutation.shuffle(rng);
        self.update_cost();
    }

    /// Perturbs the solution with `n` random swaps of distinct positions.
    ///
    /// The swaps go through the incremental cost path, so the cache stays
    /// consistent.
    ///
    /// # Panics
    ///
    /// Panics if the permutation has fewer than 2 elements.
    pub fn perturb<R>(&mut self, n: usize, rng: &mut R)
    where
        R: Rng,
    {
        assert!(
            self.permutation.len() >= 2,
            "called `PermutationSolution::perturb` on a solution of size {}, but perturbation needs at least 2 elements",
            self.permutation.len()
        );

        for _ in 0..n {
            let p1 = rng.random_range(0..self.permutation.len());
            let mut p2 = rng.random_range(0..self.permutation.len());
            while p1 == p2 {
                p2 = rng.random_range(0..self.permutation.len());
            }
            self.apply_swap(p1, p2);
        }
    }
}

impl<E> Evaluable for PermutationSolution<E>
where
    E: PermutationObjective,
{
    type Cost = E::Cost;

    #[inline]
    fn objective_value(&self) -> E::Cost {
        self.cached_cost
    }
}

impl<E> CopyFrom for PermutationSolution<E>
where
    E: PermutationObjective,
{
    #[inline]
    fn copy_from(&mut self, other: &Self) {
        self.permutation.clone_from(&other.permutation);
        self.cached_cost = other.cached_cost;
    }
}

impl<E> Permutation for PermutationSolution<E>
where
    E: PermutationObjective,
{
    #[inline]
    fn len(&self) -> usize {
        self.permutation.len()
    }

    #[inline]
    fn element(&self, index: usize) -> usize {
        debug_assert!(
            index < self.permutation.len(),
            "called `PermutationSolution::element` with index out of bounds: the len is {} but the index is {}",
            self.permutation.len(),
            index
        );

        self.permutation[index]
    }

    #[inline]
    fn evaluate_swap(&self, i: usize, j: usize) -> E::Cost {
        self.objective.swap_delta(&self.permutation, i, j)
    }

    #[inline]
    fn apply_swap(&mut self, i: usize, j: usize) {
        // Price the swap against the pre-swap permutation, then mutate.
        let delta = self.objective.swap_delta(&self.permutation, i, j);
        self.cached_cost = self.cached_cost + delta;
        self.permutation.swap(i, j);
    }
}
