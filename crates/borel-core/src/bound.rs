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

//! # Interval Bounds
//!
//! The [`Bound`] tag distinguishes endpoints that belong to an interval
//! (`CLOSED`) from endpoints that are excluded (`OPEN`). Unbounded endpoints
//! are encoded as `(±∞, OPEN)` by the interval types.
//!
//! The helpers in this module turn the endpoint case analysis of interval
//! arithmetic into three total functions: the *tighter* bound wins under
//! intersection, the *wider* bound wins under union, and complementation
//! flips a bound. Together with the endpoint value they form the canonical
//! `(value, tie-breaker)` pair that the rest of the interval algebra
//! compares with a single lexicographic comparison.

use std::fmt;

/// Whether an interval endpoint is included in the interval.
///
/// # Examples
///
/// ```rust
/// use borel_core::bound::Bound;
///
/// assert_eq!(Bound::Open.flipped(), Bound::Closed);
/// assert_eq!(Bound::Closed.intersect(Bound::Open), Bound::Open);
/// assert_eq!(Bound::Closed.union(Bound::Open), Bound::Closed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Bound {
    /// The endpoint belongs to the interval.
    Closed,
    /// The endpoint is excluded from the interval.
    Open,
}

impl Bound {
    /// Returns the bound a complement operation produces at this endpoint.
    ///
    /// A point that was included is excluded from the complement and vice
    /// versa.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Bound::Closed => Bound::Open,
            Bound::Open => Bound::Closed,
        }
    }

    /// Returns the tighter of two bounds meeting at the same endpoint value.
    ///
    /// Used when intersecting two intervals: if either side excludes the
    /// endpoint, the intersection excludes it as well.
    #[inline]
    pub const fn intersect(self, other: Self) -> Self {
        match (self, other) {
            (Bound::Closed, Bound::Closed) => Bound::Closed,
            _ => Bound::Open,
        }
    }

    /// Returns the wider of two bounds meeting at the same endpoint value.
    ///
    /// Used when merging two intervals: if either side includes the
    /// endpoint, the union includes it as well.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        match (self, other) {
            (Bound::Open, Bound::Open) => Bound::Open,
            _ => Bound::Closed,
        }
    }

    /// Returns `true` if the endpoint belongs to the interval.
    #[inline]
    pub const fn is_closed(self) -> bool {
        matches!(self, Bound::Closed)
    }

    /// Returns `true` if the endpoint is excluded from the interval.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Bound::Open)
    }

    /// The name used on the JSON wire (`"CLOSED"` / `"OPEN"`).
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Bound::Closed => "CLOSED",
            Bound::Open => "OPEN",
        }
    }

    /// Parses the wire name produced by [`Bound::as_str`].
    #[inline]
    pub fn from_str_opt(name: &str) -> Option<Self> {
        match name {
            "CLOSED" => Some(Bound::Closed),
            "OPEN" => Some(Bound::Open),
            _ => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
