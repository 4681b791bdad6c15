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

//! Composable termination criteria.
//!
//! Engines query a termination criterion once per iteration, before doing
//! any work. Criteria are stateful: a query advances the criterion's
//! internal counters even when it does not terminate, and `reset` restores
//! the construction-time state so the same criterion can drive several runs.
//!
//! Criteria compose through `TerminationChain`, which queries its members in
//! insertion order and terminates as soon as any member does; members after
//! the firing one are not advanced on that query. `reset` is recursive over
//! the chain.
//!
//! Provided criteria:
//! - `IterationLimit`: stop after a fixed number of queries.
//! - `NoImprovementLimit`: stop after a window of queries without the cost
//!   dropping below the criterion's own best by more than epsilon.
//! - `CostThreshold`: stop as soon as the cost falls below a level.
//! - `Forever`: never stop; for engines with their own halting condition,
//!   such as the simulated-annealing temperature floor.
//!
//! External cancellation plugs in the same way: a custom criterion that
//! reads a flag and returns `true` stops the search at the next iteration
//! boundary.

use capstan_model::num::CostValue;
use capstan_model::solution::Evaluable;

/// A stateful, resettable stop condition queried once per engine iteration.
pub trait TerminationCriterion<S> {
    /// Returns `true` if the search should stop now. Advances internal
    /// state even when returning `false`.
    fn should_terminate(&mut self, solution: &S) -> bool;

    /// Restores the construction-time state.
    fn reset(&mut self);
}

impl<'a, S> std::fmt::Debug for (dyn TerminationCriterion<S> + 'a) {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TerminationCriterion")
    }
}

/// Terminates after a fixed number of queries.
///
/// A limit of `M` lets exactly `M` queries pass and fires on query `M + 1`,
/// so a limit of 0 terminates on the first query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationLimit {
    limit: u64,
    remaining: u64,
}

impl IterationLimit {
    /// Creates a criterion allowing `limit` iterations.
    #[inline]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    /// The number of queries left before the criterion fires.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<S> TerminationCriterion<S> for IterationLimit {
    #[inline]
    fn should_terminate(&mut self, _solution: &S) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }

    #[inline]
    fn reset(&mut self) {
        self.remaining = self.limit;
    }
}

/// Terminates after a window of queries without improvement.
///
/// The criterion tracks its own best cost (not the recorder's): a query
/// improves iff the current cost is below that best by more than epsilon.
/// An improving query restores the window; `window` consecutive
/// non-improving queries exhaust it and the next query fires. The criterion
/// additionally tracks the longest non-improving streak that preceded an
/// improvement (`second_guess`) and the number of improvements (`resets`),
/// which are useful for tuning the window.
#[derive(Debug, Clone, PartialEq)]
pub struct NoImprovementLimit<C>
where
    C: CostValue,
{
    window: u64,
    epsilon: C,
    best_cost: C,
    remaining: u64,
    total_queries: u64,
    resets: u64,
    second_guess: u64,
}

impl<C> NoImprovementLimit<C>
where
    C: CostValue,
{
    /// Creates a criterion with the given window and improvement tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `window` is 0 or `epsilon` is negative.
    pub fn new(window: u64, epsilon: C) -> Self {
        assert!(
            window > 0,
            "called `NoImprovementLimit::new()` with window 0, but the window must be at least 1"
        );
        assert!(
            epsilon >= C::zero(),
            "called `NoImprovementLimit::new()` with negative epsilon {}, but the tolerance must be non-negative",
            epsilon
        );

        Self {
            window,
            epsilon,
            best_cost: C::infinity(),
            remaining: window,
            total_queries: 0,
            resets: 0,
            second_guess: 0,
        }
    }

    /// The longest non-improving streak observed before an improvement.
    #[inline]
    pub fn second_guess(&self) -> u64 {
        self.second_guess
    }

    /// The number of improving queries observed.
    #[inline]
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// The total number of queries observed.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.total_queries
    }
}

impl<C, S> TerminationCriterion<S> for NoImprovementLimit<C>
where
    C: CostValue,
    S: Evaluable<Cost = C>,
{
    fn should_terminate(&mut self, solution: &S) -> bool {
        let current_cost = solution.objective_value();
        if current_cost < self.best_cost - self.epsilon {
            self.best_cost = current_cost;
            self.second_guess = self.second_guess.max(self.window - self.remaining);
            self.remaining = self.window;
            self.resets += 1;
        }

        if self.remaining == 0 {
            return true;
        }

        self.total_queries += 1;
        self.remaining -= 1;
        false
    }

    fn reset(&mut self) {
        self.best_cost = C::infinity();
        self.remaining = self.window;
        self.total_queries = 0;
        self.resets = 0;
        self.second_guess = 0;
    }
}

/// Terminates as soon as the cost falls below `level + epsilon`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostThreshold<C>
where
    C: CostValue,
{
    level: C,
    epsilon: C,
}

impl<C> CostThreshold<C>
where
    C: CostValue,
{
    /// Creates a criterion firing when the cost drops below `level`, within
    /// `epsilon`.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` is negative.
    pub fn new(level: C, epsilon: C) -> Self {
        assert!(
            epsilon >= C::zero(),
            "called `CostThreshold::new()` with negative epsilon {}, but the tolerance must be non-negative",
            epsilon
        );

        Self { level, epsilon }
    }
}

impl<C, S> TerminationCriterion<S> for CostThreshold<C>
where
    C: CostValue,
    S: Evaluable<Cost = C>,
{
    #[inline]
    fn should_terminate(&mut self, solution: &S) -> bool {
        solution.objective_value() < self.level + self.epsilon
    }

    #[inline]
    fn reset(&mut self) {
        // Stateless.
    }
}

/// A criterion that never terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Forever;

impl<S> TerminationCriterion<S> for Forever {
    #[inline]
    fn should_terminate(&mut self, _solution: &S) -> bool {
        false
    }

    #[inline]
    fn reset(&mut self) {}
}

/// An ordered composition of criteria that fires when any member fires.
///
/// Members are queried in insertion order; the first terminating member
/// short-circuits the query, so members after it do not advance on that
/// query.
#[derive(Default, Debug)]
pub struct TerminationChain<'a, S> {
    criteria: Vec<Box<dyn TerminationCriterion<S> + 'a>>,
}

impl<'a, S> TerminationChain<'a, S> {
    /// Creates an empty chain. An empty chain never terminates.
    #[inline]
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Creates an empty chain with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            criteria: Vec::with_capacity(capacity),
        }
    }

    /// Appends a criterion to the end of the chain.
    #[inline]
    pub fn add_criterion<Tc>(&mut self, criterion: Tc)
    where
        Tc: TerminationCriterion<S> + 'a,
    {
        self.criteria.push(Box::new(criterion));
    }

    /// Appends an already boxed criterion.
    #[inline]
    pub fn add_boxed_criterion(&mut self, criterion: Box<dyn TerminationCriterion<S> + 'a>) {
        self.criteria.push(criterion);
    }

    /// The number of criteria in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns `true` if the chain has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl<S> TerminationCriterion<S> for TerminationChain<'_, S> {
    fn should_terminate(&mut self, solution: &S) -> bool {
        for criterion in &mut self.criteria {
            if criterion.should_terminate(solution) {
                return true;
            }
        }
        false
    }

    fn reset(&mut self) {
        for criterion in &mut self.criteria {
            criterion.reset();
        }
    }
}
