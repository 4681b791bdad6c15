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

//! Short-term memory for tabu search.
//!
//! The tabu memory remembers recently made moves so the search does not
//! immediately cycle back into the local optimum it just escaped. The
//! provided `FifoTabuList` keeps the last `tenure` recorded moves as
//! independent clones in a ring of insertion order, paired with a hash-based
//! multiset for O(1) membership tests; recording beyond the tenure expires
//! the oldest entry. The same move may be recorded more than once within the
//! tenure, and it stays tabu until its last occurrence expires.
//!
//! The `BestEverAspiration` criterion provides the classic override: a tabu
//! move is admissible anyway when the cost it proposes beats the best cost
//! this criterion has observed. The engine feeds it the working solution
//! every iteration (after offering to the recorder), but the criterion
//! tracks its own best rather than reading the recorder's.

use capstan_model::moves::TabuMove;
use capstan_model::num::CostValue;
use capstan_model::solution::Evaluable;
use std::collections::{HashMap, VecDeque};

/// A memory of recently made moves.
///
/// Implementations own independent clones of the recorded moves; callers
/// never mutate a recorded token.
pub trait TabuMemory<S, M> {
    /// Returns `true` iff a move equal to `mv` is currently remembered.
    fn is_move_tabu(&self, mv: &M) -> bool;

    /// Solution-aware tabu test. The default ignores the solution and
    /// delegates to `is_move_tabu`; implementations may refine it.
    #[inline]
    fn is_tabu(&self, _solution: &S, mv: &M) -> bool {
        self.is_move_tabu(mv)
    }

    /// Records a clone of `mv`, possibly expiring the oldest entry.
    fn record(&mut self, mv: &M);

    /// Forgets all recorded moves.
    fn reset(&mut self);
}

/// A bounded FIFO tabu list with hash-based membership.
#[derive(Debug, Clone)]
pub struct FifoTabuList<M>
where
    M: TabuMove,
{
    tenure: usize,                // Maximum number of remembered moves
    queue: VecDeque<M>,           // Insertion order, for expiry
    occurrences: HashMap<M, usize>, // Multiset index, for O(1) membership
}

impl<M> FifoTabuList<M>
where
    M: TabuMove,
{
    /// Creates a tabu list remembering the last `tenure` recorded moves.
    ///
    /// # Panics
    ///
    /// Panics if `tenure` is 0.
    pub fn new(tenure: usize) -> Self {
        assert!(
            tenure > 0,
            "called `FifoTabuList::new()` with tenure {}, but tenure must be greater than 0",
            tenure
        );

        Self {
            tenure,
            queue: VecDeque::with_capacity(tenure),
            occurrences: HashMap::with_capacity(tenure),
        }
    }

    /// The configured tenure.
    #[inline]
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// The number of moves currently remembered.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no moves are remembered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns `true` iff a move equal to `mv` is currently remembered.
    #[inline]
    pub fn is_move_tabu(&self, mv: &M) -> bool {
        self.occurrences.contains_key(mv)
    }

    /// Records a clone of `mv`, expiring the oldest entry when the tenure
    /// is exceeded.
    pub fn record(&mut self, mv: &M) {
        // If the list is full, expire the oldest entry
        if self.queue.len() >= self.tenure
            && let Some(oldest) = self.queue.pop_front()
        {
            if let Some(count) = self.occurrences.get_mut(&oldest) {
                *count -= 1;
                if *count == 0 {
                    self.occurrences.remove(&oldest);
                }
            }
        }

        self.queue.push_back(mv.clone());
        *self.occurrences.entry(mv.clone()).or_insert(0) += 1;

        debug_assert_eq!(
            self.queue.len(),
            self.occurrences.values().sum::<usize>(),
            "queue and membership index diverged"
        );
    }

    /// Forgets all recorded moves.
    #[inline]
    pub fn reset(&mut self) {
        self.queue.clear();
        self.occurrences.clear();
    }
}

impl<S, M> TabuMemory<S, M> for FifoTabuList<M>
where
    M: TabuMove,
{
    #[inline]
    fn is_move_tabu(&self, mv: &M) -> bool {
        FifoTabuList::is_move_tabu(self, mv)
    }

    #[inline]
    fn record(&mut self, mv: &M) {
        FifoTabuList::record(self, mv);
    }

    #[inline]
    fn reset(&mut self) {
        FifoTabuList::reset(self);
    }
}

/// An aspiration criterion deciding when to override tabu status.
pub trait AspirationCriterion<S>
where
    S: Evaluable,
{
    /// Returns `true` iff a tabu move proposing `proposed_cost` should be
    /// admissible anyway.
    fn accepts(&mut self, solution: &S, proposed_cost: S::Cost) -> bool;

    /// Lets the criterion observe the working solution; called once per
    /// engine iteration after the recorder is offered the solution.
    fn observe(&mut self, solution: &S);

    /// Restores the construction-time state.
    fn reset(&mut self);
}

/// The classic best-ever aspiration: override tabu iff the proposed cost is
/// strictly below the best cost observed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct BestEverAspiration<C>
where
    C: CostValue,
{
    best_cost: C,
}

impl<C> BestEverAspiration<C>
where
    C: CostValue,
{
    /// Creates an aspiration criterion with no observation yet; until the
    /// first one, every finite proposed cost aspires.
    #[inline]
    pub fn new() -> Self {
        Self {
            best_cost: C::infinity(),
        }
    }

    /// The best cost observed so far.
    #[inline]
    pub fn best_cost(&self) -> C {
        self.best_cost
    }
}

impl<C> Default for BestEverAspiration<C>
where
    C: CostValue,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> AspirationCriterion<S> for BestEverAspiration<C>
where
    C: CostValue,
    S: Evaluable<Cost = C>,
{
    #[inline]
    fn accepts(&mut self, _solution: &S, proposed_cost: C) -> bool {
        proposed_cost < self.best_cost
    }

    #[inline]
    fn observe(&mut self, solution: &S) {
        let cost = solution.objective_value();
        if cost < self.best_cost {
            self.best_cost = cost;
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.best_cost = C::infinity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstan_model::moves::SwapElements;

    #[derive(Debug, Clone)]
    struct Level {
        cost: f64,
    }

    impl Evaluable for Level {
        type Cost = f64;

        fn objective_value(&self) -> f64 {
            self.cost
        }
    }

    fn swap(i: usize, j: usize) -> SwapElements {
        SwapElements::new(i, j)
    }

    #[test]
    fn test_record_and_membership() {
        let mut list: FifoTabuList<SwapElements> = FifoTabuList::new(4);
        assert!(list.is_empty());

        list.record(&swap(0, 1));
        list.record(&swap(2, 3));

        assert_eq!(list.len(), 2);
        assert!(list.is_move_tabu(&swap(0, 1)));
        // Normalized index order: (3, 2) is the same move as (2, 3).
        assert!(list.is_move_tabu(&swap(3, 2)));
        assert!(!list.is_move_tabu(&swap(0, 2)));
    }

    #[test]
    fn test_fifo_eviction_keeps_most_recent_tenure() {
        let mut list: FifoTabuList<SwapElements> = FifoTabuList::new(3);
        let moves = [swap(0, 1), swap(0, 2), swap(0, 3), swap(0, 4)];

        for mv in &moves {
            list.record(mv);
        }

        assert_eq!(list.len(), 3, "size must never exceed the tenure");
        assert!(!list.is_move_tabu(&moves[0]), "the oldest entry must be evicted");
        assert!(list.is_move_tabu(&moves[1]));
        assert!(list.is_move_tabu(&moves[2]));
        assert!(list.is_move_tabu(&moves[3]));
    }

    #[test]
    fn test_duplicate_stays_tabu_until_last_occurrence_expires() {
        let mut list: FifoTabuList<SwapElements> = FifoTabuList::new(2);

        list.record(&swap(0, 1));
        list.record(&swap(0, 1));
        assert!(list.is_move_tabu(&swap(0, 1)));

        // Evicts one occurrence of (0, 1); the other is still present.
        list.record(&swap(2, 3));
        assert!(list.is_move_tabu(&swap(0, 1)));

        // Evicts the last occurrence.
        list.record(&swap(4, 5));
        assert!(!list.is_move_tabu(&swap(0, 1)));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut list: FifoTabuList<SwapElements> = FifoTabuList::new(3);
        list.record(&swap(0, 1));
        list.record(&swap(1, 2));

        TabuMemory::<Level, _>::reset(&mut list);

        assert!(list.is_empty());
        assert!(!list.is_move_tabu(&swap(0, 1)));
        assert!(!list.is_move_tabu(&swap(1, 2)));
    }

    #[test]
    fn test_solution_aware_default_delegates() {
        let mut list: FifoTabuList<SwapElements> = FifoTabuList::new(2);
        list.record(&swap(1, 4));

        let solution = Level { cost: 0.0 };
        assert!(TabuMemory::is_tabu(&list, &solution, &swap(1, 4)));
        assert!(!TabuMemory::is_tabu(&list, &solution, &swap(1, 3)));
    }

    #[test]
    #[should_panic(expected = "called `FifoTabuList::new()` with tenure 0")]
    fn test_zero_tenure_panics() {
        let _list: FifoTabuList<SwapElements> = FifoTabuList::new(0);
    }

    #[test]
    fn test_aspiration_accepts_only_below_best() {
        let mut aspiration = BestEverAspiration::new();
        let current = Level { cost: 120.0 };

        // Nothing observed yet: everything finite aspires.
        assert!(aspiration.accepts(&current, 1e9));

        aspiration.observe(&Level { cost: 100.0 });
        assert_eq!(aspiration.best_cost(), 100.0);

        assert!(aspiration.accepts(&current, 95.0));
        assert!(!aspiration.accepts(&current, 100.0), "equal cost must not aspire");
        assert!(!aspiration.accepts(&current, 104.0));
    }

    #[test]
    fn test_aspiration_tracks_minimum_of_observations() {
        let mut aspiration = BestEverAspiration::new();
        aspiration.observe(&Level { cost: 80.0 });
        aspiration.observe(&Level { cost: 110.0 });

        assert_eq!(aspiration.best_cost(), 80.0);

        AspirationCriterion::<Level>::reset(&mut aspiration);
        assert_eq!(aspiration.best_cost(), f64::INFINITY);
    }
}
