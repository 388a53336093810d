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

//! # Product Event Algebra
//!
//! The product instantiation of the abstract set algebra. A [`SimpleEvent`]
//! is one Cartesian product of per-variable sets; an [`Event`] is a
//! canonical disjoint union of simple events over a shared variable set.
//!
//! The complement of a simple event over `n` variables produces `n` simple
//! events via the telescoping identity
//!
//! ```text
//! (A₁ × A₂ × … × Aₙ)ᶜ = (A₁ᶜ × 𝔸₂ × … × 𝔸ₙ)
//!                     ⊎ (A₁ × A₂ᶜ × 𝔸₃ × … × 𝔸ₙ)
//!                     ⊎ …
//!                     ⊎ (A₁ × A₂ × … × Aₙᶜ)
//! ```
//!
//! rather than the `2ⁿ − 1` products of the naive expansion, which keeps
//! complement and difference tractable in the number of variables.

mod composite;
mod simple;

pub use composite::Event;
pub use simple::SimpleEvent;
