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

//! Recording the best solution seen during a search.
//!
//! The recorder owns an independent copy of the incumbent. Engines offer the
//! working solution after every applied move; the recorder keeps it only on
//! strict improvement, overwriting its copy in place through `CopyFrom` so
//! the hot path does not reallocate.

use capstan_model::solution::{CopyFrom, Evaluable};

/// A sink for candidate solutions that keeps the best one.
pub trait SolutionRecorder<S> {
    /// Offers `solution` to the recorder. Returns `true` iff it improved
    /// upon the recorded best and was kept.
    fn accept(&mut self, solution: &S) -> bool;
}

/// A recorder that keeps the best-ever solution by strict cost comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct BestEverRecorder<S>
where
    S: Evaluable + CopyFrom + Clone,
{
    best: S,
}

impl<S> BestEverRecorder<S>
where
    S: Evaluable + CopyFrom + Clone,
{
    /// Creates a recorder seeded with a copy of `initial`.
    #[inline]
    pub fn new(initial: &S) -> Self {
        Self {
            best: initial.clone(),
        }
    }

    /// The best solution recorded so far.
    #[inline]
    pub fn best_solution(&self) -> &S {
        &self.best
    }

    /// The objective value of the best solution recorded so far.
    #[inline]
    pub fn best_cost(&self) -> S::Cost {
        self.best.objective_value()
    }

    /// Consumes the recorder and returns the best solution.
    #[inline]
    pub fn into_best_solution(self) -> S {
        self.best
    }
}

impl<S> SolutionRecorder<S> for BestEverRecorder<S>
where
    S: Evaluable + CopyFrom + Clone,
{
    #[inline]
    fn accept(&mut self, solution: &S) -> bool {
        if solution.objective_value() < self.best.objective_value() {
            self.best.copy_from(solution);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Level {
        cost: f64,
    }

    impl Evaluable for Level {
        type Cost = f64;

        fn objective_value(&self) -> f64 {
            self.cost
        }
    }

    impl CopyFrom for Level {
        fn copy_from(&mut self, other: &Self) {
            self.cost = other.cost;
        }
    }

    #[test]
    fn test_accept_keeps_strict_improvements_only() {
        let mut recorder = BestEverRecorder::new(&Level { cost: 10.0 });

        assert!(!recorder.accept(&Level { cost: 10.0 }), "equal cost must be rejected");
        assert!(!recorder.accept(&Level { cost: 12.0 }), "worse cost must be rejected");
        assert_eq!(recorder.best_cost(), 10.0);

        assert!(recorder.accept(&Level { cost: 9.5 }));
        assert_eq!(recorder.best_cost(), 9.5);
    }

    #[test]
    fn test_recorder_holds_independent_copy() {
        let mut working = Level { cost: 8.0 };
        let mut recorder = BestEverRecorder::new(&Level { cost: 10.0 });

        assert!(recorder.accept(&working));
        working.cost = 99.0;

        assert_eq!(recorder.best_cost(), 8.0, "recorded best must not alias the working solution");
        assert_eq!(recorder.into_best_solution(), Level { cost: 8.0 });
    }
}
