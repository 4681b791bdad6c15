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

//! Tabu Search.
//!
//! A memory-based strategy that escapes local optima by forbidding recently
//! made moves. Each iteration scans the whole neighborhood and selects the
//! *admissible* candidate with the lowest evaluated cost, where a candidate
//! is admissible iff it is not in the tabu memory, or it is but the
//! aspiration criterion clears it because the cost it proposes beats the
//! best observed so far. Crucially, the selected move may worsen the current
//! cost; moving away from an exhausted optimum is the point.
//!
//! After applying the selected move, the engine records the move's
//! *opposite* (by default the move itself) into the tabu memory, offers the
//! working solution to the recorder, lets the aspiration criterion observe
//! it, and publishes an event. If an iteration finds no admissible candidate
//! at all, the run aborts: an `Aborted` event is published, the outcome
//! reports `NoAdmissibleMove`, and the working solution is left exactly as
//! the previous iteration produced it. The recorder's best remains valid.
//!
//! Ties between admissible candidates are broken by iteration order (the
//! first minimum wins), which keeps runs reproducible for deterministic
//! managers.

use crate::memory::{AspirationCriterion, TabuMemory};
use crate::observer::{SearchEvent, SearchObserver, SearchStep, SubscriberList};
use crate::recorder::SolutionRecorder;
use crate::result::SearchOutcome;
use crate::stats::SearchStatistics;
use crate::termination::TerminationCriterion;
use capstan_model::moves::{Move, TabuMove};
use capstan_model::neighborhood::MoveManager;
use capstan_model::solution::Evaluable;
use num_traits::Float;
use std::time::Instant;

/// A tabu search engine over a working solution.
///
/// Owns the move manager, tabu memory, aspiration criterion, termination
/// criterion, and recorder; the working solution is borrowed per `search()`
/// call.
pub struct TabuSearch<S, MM, R, TM, A, TC>
where
    S: Evaluable,
    MM: MoveManager<S>,
    MM::Move: TabuMove,
    R: SolutionRecorder<S>,
    TM: TabuMemory<S, MM::Move>,
    A: AspirationCriterion<S>,
    TC: TerminationCriterion<S>,
{
    manager: MM,
    recorder: R,
    tabu_memory: TM,
    aspiration: A,
    termination: TC,
    observers: SubscriberList<S, MM::Move>,
}

impl<S, MM, R, TM, A, TC> TabuSearch<S, MM, R, TM, A, TC>
where
    S: Evaluable,
    MM: MoveManager<S>,
    MM::Move: TabuMove,
    R: SolutionRecorder<S>,
    TM: TabuMemory<S, MM::Move>,
    A: AspirationCriterion<S>,
    TC: TerminationCriterion<S>,
{
    /// Creates a tabu search from its collaborators.
    pub fn new(
        recorder: R,
        manager: MM,
        tabu_memory: TM,
        aspiration: A,
        termination: TC,
    ) -> Self {
        Self {
            manager,
            recorder,
            tabu_memory,
            aspiration,
            termination,
            observers: SubscriberList::new(),
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

    /// The tabu memory.
    #[inline]
    pub fn tabu_memory(&self) -> &TM {
        &self.tabu_memory
    }

    /// Mutable access to the termination criterion, e.g. to reset it
    /// between runs.
    #[inline]
    pub fn termination_mut(&mut self) -> &mut TC {
        &mut self.termination
    }

    /// Runs the search on `working` until the termination criterion fires
    /// or no admissible move exists.
    pub fn search(&mut self, working: &mut S) -> SearchOutcome {
        let start_time = Instant::now();
        let mut stats = SearchStatistics::default();

        // Seed the aspiration with the starting cost so early tabu moves do
        // not all aspire against the +infinity sentinel.
        self.aspiration.observe(&*working);

        let aborted = loop {
            if self.termination.should_terminate(&*working) {
                break false;
            }

            stats.on_iteration();
            self.manager.refresh(&*working);

            let mut chosen: Option<usize> = None;
            let mut chosen_cost = S::Cost::infinity();
            for (index, mv) in self.manager.moves().iter().enumerate() {
                let cost = mv.evaluate(&*working);
                stats.on_evaluated_move();

                if self.tabu_memory.is_tabu(&*working, mv)
                    && !self.aspiration.accepts(&*working, cost)
                {
                    continue;
                }

                // Strict comparison keeps the first of equal-cost candidates.
                if cost < chosen_cost {
                    chosen_cost = cost;
                    chosen = Some(index);
                }
            }

            let Some(index) = chosen else {
                // Nothing admissible this iteration; the working solution is
                // untouched since the previous one.
                self.observers
                    .notify(&SearchEvent::new(SearchStep::Aborted, &*working, None));
                break true;
            };

            let mv = &self.manager.moves()[index];
            mv.apply(working);
            stats.on_accepted_move();
            self.tabu_memory.record(&mv.opposite_of());

            let improved = self.recorder.accept(&*working);
            if improved {
                stats.on_improvement();
            }
            self.aspiration.observe(&*working);

            let step = if improved {
                SearchStep::ImprovementMade
            } else {
                SearchStep::MoveMade
            };
            self.observers
                .notify(&SearchEvent::new(step, &*working, Some(mv)));
        };

        stats.set_total_time(start_time.elapsed());
        if aborted {
            SearchOutcome::no_admissible_move(stats)
        } else {
            SearchOutcome::criterion_met(stats)
        }
    }
}
