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

//! Statistics reporting for search runs.
//!
//! A lightweight counter set updated from the engines' hot loops: iteration
//! count, candidate evaluations, applied moves, improvements of the recorded
//! best, and total wall-clock time. Updates use saturating arithmetic so a
//! pathological run cannot trap on overflow, and the struct is cheap to copy
//! into the final `SearchOutcome`.

use std::time::Duration;

/// Aggregate counters for one search run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchStatistics {
    /// Number of engine iterations performed.
    pub iterations: u64,

    /// Number of candidate moves evaluated.
    pub evaluated_moves: u64,

    /// Number of moves applied to the working solution.
    pub accepted_moves: u64,

    /// Number of times the recorded best solution improved.
    pub improvements: u64,

    /// Total wall-clock time of the run.
    pub time_total: Duration,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self {
            iterations: 0,
            evaluated_moves: 0,
            accepted_moves: 0,
            improvements: 0,
            time_total: Duration::ZERO,
        }
    }
}

impl SearchStatistics {
    /// Called at each engine iteration.
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    /// Called for each candidate move evaluation.
    #[inline]
    pub fn on_evaluated_move(&mut self) {
        self.evaluated_moves = self.evaluated_moves.saturating_add(1);
    }

    /// Called when a move is applied to the working solution.
    #[inline]
    pub fn on_accepted_move(&mut self) {
        self.accepted_moves = self.accepted_moves.saturating_add(1);
    }

    /// Called when the recorded best solution improves.
    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    /// Sets the total wall-clock time of the run.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Number of evaluated candidates that were not applied.
    #[inline]
    pub fn rejected_moves(&self) -> u64 {
        self.evaluated_moves.saturating_sub(self.accepted_moves)
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Capstan Search Statistics:")?;
        writeln!(f, "   Iterations:       {}", self.iterations)?;
        writeln!(f, "   Evaluated Moves:  {}", self.evaluated_moves)?;
        writeln!(f, "   Accepted Moves:   {}", self.accepted_moves)?;
        writeln!(f, "   Improvements:     {}", self.improvements)?;
        writeln!(f, "   Total Time:       {:?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = SearchStatistics::default();
        stats.on_iteration();
        stats.on_iteration();
        stats.on_evaluated_move();
        stats.on_evaluated_move();
        stats.on_evaluated_move();
        stats.on_accepted_move();
        stats.on_improvement();

        assert_eq!(stats.iterations, 2);
        assert_eq!(stats.evaluated_moves, 3);
        assert_eq!(stats.accepted_moves, 1);
        assert_eq!(stats.improvements, 1);
        assert_eq!(stats.rejected_moves(), 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            iterations: u64::MAX,
            ..SearchStatistics::default()
        };
        stats.on_iteration();
        assert_eq!(stats.iterations, u64::MAX);
    }

    #[test]
    fn test_display_lists_all_counters() {
        let stats = SearchStatistics::default();
        let rendered = stats.to_string();
        assert!(rendered.contains("Iterations"));
        assert!(rendered.contains("Evaluated Moves"));
        assert!(rendered.contains("Total Time"));
    }
}
