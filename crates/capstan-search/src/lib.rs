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

//! # Capstan Search
//!
//! Search engines and supporting machinery for the Capstan local-search
//! framework. The crate consumes the contracts defined in `capstan-model`
//! (solutions, moves, move managers) and adds everything needed to drive a
//! working solution toward a good one:
//!
//! - `memory`: bounded FIFO tabu memory with hash-based membership, plus the
//!   best-ever aspiration criterion that overrides tabu status.
//! - `termination`: composable, resettable termination criteria (iteration
//!   budget, no-improvement window, cost threshold, never) and a chain that
//!   fires when any member fires.
//! - `recorder`: the best-ever solution recorder.
//! - `observer`: synchronous event notification (move made, improvement
//!   made, aborted) in subscription order.
//! - `stats` / `result`: per-run counters and the termination status of a
//!   finished search.
//! - `engine`: the three search engines — neighborhood descent, tabu search,
//!   and simulated annealing with pluggable cooling schedules.
//!
//! Every engine is single-threaded, runs to completion inside `search()`,
//! and is deterministic for a fixed seed of its injected PRNG.

pub mod engine;
pub mod memory;
pub mod observer;
pub mod recorder;
pub mod result;
pub mod stats;
pub mod termination;
