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

//! Neighborhood descent.
//!
//! The simplest of the engines: each iteration scans the neighborhood for a
//! move whose evaluated cost beats the current cost by more than the
//! improvement tolerance, applies the best such move, and repeats until no
//! candidate qualifies. With `short_circuit` enabled the scan commits to the
//! first qualifying move instead, trading solution quality per iteration for
//! much cheaper iterations on large neighborhoods. Both variants are
//! deterministic for a deterministic move manager and terminate exactly at a
//! local optimum of the move set.

use crate::observer::{SearchEvent, SearchObserver, SearchStep, SubscriberList};
use crate::recorder::SolutionRecorder;
use crate::result::SearchOutcome;
use crate::stats::SearchStatistics;
use capstan_model::moves::Move;
use capstan_model::neighborhood::MoveManager;
use capstan_model::solution::Evaluable;
use num_traits::Zero;
use std::time::Instant;

/// A neighborhood-descent engine.
///
/// Selects the best improving move per iteration (or the first one, with
/// `short_circuit`) and stops when the neighborhood offers none.
pub struct LocalSearch<S, MM, R>
where
    S: Evaluable,
    MM: MoveManager<S>,
    R: SolutionRecorder<S>,
{
    manager: MM,
    recorder: R,
    observers: SubscriberList<S, MM::Move>,
    epsilon: S::Cost,
    short_circuit: bool,
}

impl<S, MM, R> LocalSearch<S, MM, R>
where
    S: Evaluable,
    MM: MoveManager<S>,
    R: SolutionRecorder<S>,
{
    /// Creates a descent engine.
    ///
    /// `epsilon` is the minimum cost drop for a move to count as improving;
    /// `short_circuit` selects first-improvement instead of
    /// best-improvement.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` is negative.
    pub fn new(recorder: R, manager: MM, epsilon: S::Cost, short_circuit: bool) -> Self {
        assert!(
            epsilon >= S::Cost::zero(),
            "called `LocalSearch::new()` with negative epsilon {}, but the tolerance must be non-negative",
            epsilon
        );

        Self {
            manager,
            recorder,
            observers: SubscriberList::new(),
            epsilon,
            short_circuit,
        }
    }

    /// Subscribes an observer to this engine's events.
    #[inline]
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: SearchObserver<S, MM::Move> + 'static,
    {
        self.observers.subscribe(observer);
    }

    /// The recorder holding the best solution found.
    #[inline]
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Consumes the engine and returns its recorder.
    #[inline]
    pub fn into_recorder(self) -> R {
        self.recorder
    }

    /// The move manager.
    #[inline]
    pub fn manager(&self) -> &MM {
        &self.manager
    }

    /// Runs the descent on `working` until it reaches a local optimum.
    ///
    /// The working solution ends at the local optimum; the best solution
    /// along the way (usually the same one) is in the recorder.
    pub fn search(&mut self, working: &mut S) -> SearchOutcome {
        let start_time = Instant::now();
        let mut stats = SearchStatistics::default();

        // Seed the recorder with the starting point.
        if self.recorder.accept(&*working) {
            stats.on_improvement();
        }

        loop {
            stats.on_iteration();
            self.manager.refresh(&*working);

            let mut best_cost = working.objective_value();
            let mut chosen: Option<usize> = None;
            for (index, mv) in self.manager.moves().iter().enumerate() {
                let cost = mv.evaluate(&*working);
                stats.on_evaluated_move();
                if cost < best_cost - self.epsilon {
                    best_cost = cost;
                    chosen = Some(index);
                    if self.short_circuit {
                        break;
                    }
                }
            }

            let Some(index) = chosen else {
                break;
            };

            let mv = &self.manager.moves()[index];
            mv.apply(working);
            stats.on_accepted_move();

            if self.recorder.accept(&*working) {
                stats.on_improvement();
                self.observers.notify(&SearchEvent::new(
                    SearchStep::ImprovementMade,
                    &*working,
                    Some(mv),
                ));
            }
            self.observers
                .notify(&SearchEvent::new(SearchStep::MoveMade, &*working, Some(mv)));
        }

        stats.set_total_time(start_time.elapsed());
        SearchOutcome::local_optimum(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::BestEverRecorder;
    use crate::result::SearchTermination;
    use capstan_model::neighborhood::SwapFullNeighborhood;
    use capstan_model::permutation::{PermutationObjective, PermutationSolution};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Arrangement {
        weights: Vec<f64>,
    }

    impl PermutationObjective for Arrangement {
        type Cost = f64;

        fn full_cost(&self, permutation: &[usize]) -> f64 {
            permutation
                .iter()
                .enumerate()
                .map(|(position, &element)| position as f64 * self.weights[element])
                .sum()
        }

        fn swap_delta(&self, permutation: &[usize], i: usize, j: usize) -> f64 {
            let wi = self.weights[permutation[i]];
            let wj = self.weights[permutation[j]];
            (i as f64 - j as f64) * (wj - wi)
        }
    }

    type Working = PermutationSolution<Arrangement>;

    fn working(n: usize) -> Working {
        let objective = Arrangement {
            weights: (0..n).map(|w| (w + 1) as f64).collect(),
        };
        PermutationSolution::new(objective, n)
    }

    // The optimum of the arrangement places the heaviest element first.
    fn optimal_cost(n: usize) -> f64 {
        (0..n).map(|position| position as f64 * (n - position) as f64).sum()
    }

    struct StepCounter {
        steps: Rc<RefCell<Vec<SearchStep>>>,
    }

    impl SearchObserver<Working, capstan_model::moves::SwapElements> for StepCounter {
        fn name(&self) -> &str {
            "StepCounter"
        }

        fn on_event(
            &mut self,
            event: &SearchEvent<'_, Working, capstan_model::moves::SwapElements>,
        ) {
            self.steps.borrow_mut().push(event.step);
        }
    }

    #[test]
    fn test_descent_reaches_the_arrangement_optimum() {
        let mut solution = working(6);
        let recorder = BestEverRecorder::new(&solution);
        let mut engine =
            LocalSearch::new(recorder, SwapFullNeighborhood::new(6), 1e-9, false);

        let outcome = engine.search(&mut solution);

        assert_eq!(outcome.termination(), SearchTermination::LocalOptimum);
        assert!(
            (engine.recorder().best_cost() - optimal_cost(6)).abs() < 1e-9,
            "descent over the full swap neighborhood must reach the optimum {}, got {}",
            optimal_cost(6),
            engine.recorder().best_cost()
        );
        assert_eq!(solution.as_slice(), &[5, 4, 3, 2, 1, 0]);
        assert!(outcome.statistics().iterations >= 1);
    }

    #[test]
    fn test_first_improvement_matches_best_improvement_result() {
        let mut best = working(7);
        let mut first = working(7);

        let mut best_engine = LocalSearch::new(
            BestEverRecorder::new(&best),
            SwapFullNeighborhood::new(7),
            1e-9,
            false,
        );
        let mut first_engine = LocalSearch::new(
            BestEverRecorder::new(&first),
            SwapFullNeighborhood::new(7),
            1e-9,
            true,
        );

        best_engine.search(&mut best);
        first_engine.search(&mut first);

        // Both variants must end at the unique optimum of this objective,
        // even though they take different paths.
        assert!((best.objective_value() - first.objective_value()).abs() < 1e-9);
    }

    #[test]
    fn test_descent_emits_improvement_and_move_events() {
        let steps = Rc::new(RefCell::new(Vec::new()));
        let mut solution = working(4);
        let mut engine = LocalSearch::new(
            BestEverRecorder::new(&solution),
            SwapFullNeighborhood::new(4),
            1e-9,
            false,
        );
        engine.subscribe(StepCounter {
            steps: Rc::clone(&steps),
        });

        engine.search(&mut solution);

        let steps = steps.borrow();
        assert!(!steps.is_empty());
        // Descent only takes improving moves, so every applied move first
        // reports an improvement and then the move itself.
        assert_eq!(steps.len() % 2, 0);
        for pair in steps.chunks(2) {
            assert_eq!(pair, &[SearchStep::ImprovementMade, SearchStep::MoveMade]);
        }
    }

    #[test]
    fn test_descent_on_optimal_start_applies_no_moves() {
        let objective = Arrangement {
            weights: vec![3.0, 2.0, 1.0],
        };
        // Weights already descending: the identity permutation is optimal.
        let mut solution = PermutationSolution::new(objective, 3);
        let mut engine = LocalSearch::new(
            BestEverRecorder::new(&solution),
            SwapFullNeighborhood::new(3),
            1e-9,
            false,
        );

        let outcome = engine.search(&mut solution);

        assert_eq!(outcome.statistics().accepted_moves, 0);
        assert_eq!(outcome.statistics().iterations, 1);
        assert_eq!(solution.as_slice(), &[0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "called `LocalSearch::new()` with negative epsilon")]
    fn test_negative_epsilon_panics() {
        let solution = working(3);
        let _engine = LocalSearch::new(
            BestEverRecorder::new(&solution),
            SwapFullNeighborhood::new(3),
            -1.0,
            false,
        );
    }
}
