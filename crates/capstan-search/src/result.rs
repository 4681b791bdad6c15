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

//! Search outcome and termination reporting.
//!
//! A finished `search()` call returns a `SearchOutcome`: why the run ended,
//! plus the run's statistics. The best solution itself stays in the
//! recorder, which the engine exposes after the run. An aborted run (no
//! admissible move in tabu search) is a status, not a panic; the recorder's
//! prior best remains valid and observable.

use crate::stats::SearchStatistics;

/// Why a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchTermination {
    /// A termination criterion fired.
    CriterionMet,

    /// Tabu search found no admissible move in the current neighborhood.
    /// The working solution is unchanged since the previous iteration.
    NoAdmissibleMove,

    /// Simulated annealing cooled down to its stop temperature.
    TemperatureFloor,

    /// Neighborhood descent found no improving move.
    LocalOptimum,
}

impl std::fmt::Display for SearchTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchTermination::CriterionMet => write!(f, "Termination Criterion Met"),
            SearchTermination::NoAdmissibleMove => write!(f, "No Admissible Move"),
            SearchTermination::TemperatureFloor => write!(f, "Temperature Floor Reached"),
            SearchTermination::LocalOptimum => write!(f, "Local Optimum Reached"),
        }
    }
}

/// Result of a search run after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    termination: SearchTermination,
    statistics: SearchStatistics,
}

impl SearchOutcome {
    /// Creates an outcome for a run stopped by its termination criterion.
    #[inline]
    pub fn criterion_met(statistics: SearchStatistics) -> Self {
        Self {
            termination: SearchTermination::CriterionMet,
            statistics,
        }
    }

    /// Creates an outcome for a tabu search aborted without an admissible
    /// move.
    #[inline]
    pub fn no_admissible_move(statistics: SearchStatistics) -> Self {
        Self {
            termination: SearchTermination::NoAdmissibleMove,
            statistics,
        }
    }

    /// Creates an outcome for a simulated annealing run that reached its
    /// stop temperature.
    #[inline]
    pub fn temperature_floor(statistics: SearchStatistics) -> Self {
        Self {
            termination: SearchTermination::TemperatureFloor,
            statistics,
        }
    }

    /// Creates an outcome for a descent that exhausted its neighborhood.
    #[inline]
    pub fn local_optimum(statistics: SearchStatistics) -> Self {
        Self {
            termination: SearchTermination::LocalOptimum,
            statistics,
        }
    }

    /// Why the run ended.
    #[inline]
    pub fn termination(&self) -> SearchTermination {
        self.termination
    }

    /// The run's statistics.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns `true` if the run ended without applying a move this
    /// iteration because no candidate was admissible.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.termination == SearchTermination::NoAdmissibleMove
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Outcome: {}", self.termination)?;
        write!(f, "{}", self.statistics)
    }
}
