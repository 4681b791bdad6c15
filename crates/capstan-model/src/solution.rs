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

//! Capability traits for solutions.
//!
//! A solution participates in a search through a small set of capabilities,
//! each expressed as its own trait so that components can demand exactly
//! what they use:
//!
//! - `Evaluable`: the solution has a finite objective value to minimize.
//! - `CopyFrom`: the solution can overwrite its state from a peer, which the
//!   best-ever recorder uses to keep an independent copy of the incumbent
//!   without reallocating.
//!
//! Cloning and hashing are covered by the standard `Clone` and `Hash`
//! traits; a component that needs them states the bound directly. Note that
//! "feasible" is a property of the space the search explores, not of the
//! problem constraints: letting the search walk through infeasible regions
//! (with a penalty folded into the objective) is a legitimate modeling
//! choice and needs no extra capability.

use crate::num::CostValue;

/// A solution with a cost function to be minimized.
///
/// The objective value must be finite for all states reachable during a
/// search. After a move is applied, the reported value must equal what a
/// full recomputation would yield, up to the numeric tolerance of the
/// problem; engines rank candidate moves on that promise.
pub trait Evaluable {
    /// The numeric type of the objective value.
    type Cost: CostValue;

    /// Returns the objective value of this solution. Lower is better.
    fn objective_value(&self) -> Self::Cost;
}

/// A solution that can overwrite its state from another instance.
///
/// Implementations should reuse existing allocations where possible; the
/// recorder calls this on every improvement.
pub trait CopyFrom {
    /// Copies the full search-relevant state of `other` into `self`.
    fn copy_from(&mut self, other: &Self);
}
