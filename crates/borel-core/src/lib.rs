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

//! # Borel Core
//!
//! Closed set algebras for computable random events. The mathematical
//! definition of an event — an arbitrary subset of a sample space — is not
//! computable; the tractable fragment is the algebra of finite unions of
//! simple sets, which is closed under union, intersection, difference, and
//! complement and admits a canonical representative per point set.
//!
//! ## Modules
//!
//! - `algebra`: The [`algebra::SimpleSet`] / [`algebra::CompositeSet`]
//!   contracts and the algorithms generic in the atom type
//!   (disjointification, simplification, canonicalization).
//! - `bound`: Open/closed endpoint tags and their tie-breaker arithmetic.
//! - `interval`: The algebra over the real line
//!   ([`interval::SimpleInterval`], [`interval::Interval`]).
//! - `symbolic`: The algebra over a fixed finite universe of symbols
//!   ([`symbolic::SetElement`], [`symbolic::Set`]).
//! - `json`: The `{"kind", "data"}` serialization contract shared by every
//!   value ([`json::JsonSerializable`]).
//!
//! The product algebra over typed variables builds on these primitives in
//! the `borel-model` crate.
//!
//! ## Canonical form
//!
//! Every composite is stored sorted, pairwise disjoint, and simplified.
//! Operations return freshly constructed canonical values, so structural
//! equality coincides with set equality and hashes are stable across
//! processes.

pub mod algebra;
pub mod bound;
pub mod interval;
pub mod json;
pub mod symbolic;

pub use algebra::{CompositeSet, SimpleSet};
pub use bound::Bound;
pub use interval::{Interval, SimpleInterval};
pub use json::{JsonError, JsonSerializable};
pub use symbolic::{Set, SetElement, SetError, Universe};
