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

//! Search engines.
//!
//! Each engine owns its collaborators (move manager, recorder, and the
//! strategy-specific pieces), mutably borrows the caller's working solution
//! for the duration of `search()`, and runs synchronously to completion.
//! Within one iteration the sequence is fixed: refresh the neighborhood,
//! scan and select a candidate, apply it, offer the result to the recorder,
//! notify observers, then advance the per-engine bookkeeping (cooling for
//! simulated annealing) and re-check termination.
//!
//! Provided engines:
//! - `local_search`: neighborhood descent, best-improvement by default with
//!   an optional first-improvement short circuit; stops at a local optimum.
//! - `tabu_search`: best-admissible selection under tabu memory with
//!   aspiration override; worsening moves are taken when nothing better is
//!   admissible.
//! - `simulated_annealing`: Metropolis acceptance under a pluggable cooling
//!   schedule with an injected PRNG.
//!
//! All engines are deterministic given identical inputs and seeds.

pub mod local_search;
pub mod simulated_annealing;
pub mod tabu_search;
