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

//! Numeric trait for objective values.
//!
//! Search components are generic over the type used to measure solution
//! quality instead of hard-coding a numeric type. `CostValue` gathers the
//! `num-traits` bounds the framework needs: floating-point arithmetic for
//! deltas and acceptance probabilities, conversion from primitives for
//! constants, formatting for diagnostics, and thread-safety markers so
//! components can be moved across thread boundaries by embedding code even
//! though a single search run is strictly single-threaded.

use num_traits::{Float, FromPrimitive};

/// A trait alias for numeric types that can serve as an objective value.
///
/// Lower values are better; the engines minimize. `f64` and `f32` satisfy
/// this trait. The `Float` bound provides the infinities used as sentinels
/// by the aspiration criterion and the no-improvement termination criterion,
/// as well as `exp` for the simulated-annealing acceptance rule.
pub trait CostValue:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> CostValue for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
