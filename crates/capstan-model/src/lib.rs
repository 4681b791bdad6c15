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

//! # Capstan Model
//!
//! Problem-facing abstractions for the Capstan local-search framework.
//! This crate defines the contracts that problem-specific code implements
//! and that the search engines in `capstan-search` consume.
//!
//! ## Modules
//!
//! - `num`: The `CostValue` trait describing objective values (floating-point
//!   numerics assembled from `num-traits` bounds).
//! - `solution`: Capability traits for solutions (`Evaluable`, `CopyFrom`).
//! - `permutation`: A ready-to-use permutation solution with a cached,
//!   incrementally maintained objective value, parameterized by a
//!   problem-specific `PermutationObjective`.
//! - `moves`: The `Move` evaluate/apply contract, the `TabuMove` marker for
//!   moves usable with tabu memory, and the canonical element-swap and
//!   subsequence-inversion moves.
//! - `neighborhood`: The `MoveManager` contract plus full and stochastic
//!   neighborhood implementations for permutation solutions.
//!
//! ## Purpose
//!
//! Engines are generic over these traits, so a problem author only has to
//! describe what a solution costs and how moves transform it. Capability
//! bounds replace runtime downcasts: a component that needs a permutation
//! says so in its signature and the compiler enforces it.

pub mod moves;
pub mod neighborhood;
pub mod num;
pub mod permutation;
pub mod solution;
