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

//! # Borel Model
//!
//! Multivariate random events on top of the one-dimensional algebras of
//! `borel-core`. This crate supplies the typed [`variable::Variable`]
//! catalog, the [`event::SimpleEvent`] / [`event::Event`] product algebra
//! with its linear-term complement, and the [`point::Point`] inclusion
//! surface consumers dispatch on.
//!
//! ## Modules
//!
//! - `variable`: Named, totally ordered dimensions owning their domain
//!   (symbolic set, integer grid, or continuous line).
//! - `event`: Cartesian products of per-variable constraints and their
//!   canonical disjoint unions.
//! - `point`: Concrete outcomes, addressed by variable name.
//! - `error`: The construction-time error taxonomy; operations on
//!   constructed events are total.
//!
//! Everything is immutable after construction and safe to share across
//! threads; the only shared state is reference-counted (variable names and
//! symbolic universes).

pub mod error;
pub mod event;
pub mod point;
pub mod variable;

pub use error::EventError;
pub use event::{Event, SimpleEvent};
pub use point::{Point, PointValue};
pub use variable::{Variable, VariableKind, VariableSet};
