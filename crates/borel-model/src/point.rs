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

//! # Points
//!
//! A [`Point`] is one concrete outcome: a value per variable, addressed by
//! variable name. Points are the query side of the event algebra — events
//! answer whether they contain a point, and consumers such as probabilistic
//! models dispatch on which simple event does.

use std::collections::BTreeMap;
use std::fmt;

/// A single coordinate of a point: a number for continuous and integer
/// variables, a symbol for symbolic ones.
#[derive(Clone, PartialEq, Debug)]
pub enum PointValue {
    /// A numeric coordinate.
    Real(f64),
    /// A symbolic coordinate, identified by its symbol.
    Symbol(String),
}

impl From<f64> for PointValue {
    fn from(value: f64) -> Self {
        PointValue::Real(value)
    }
}

impl From<i64> for PointValue {
    fn from(value: i64) -> Self {
        PointValue::Real(value as f64)
    }
}

impl From<&str> for PointValue {
    fn from(value: &str) -> Self {
        PointValue::Symbol(value.to_string())
    }
}

impl From<String> for PointValue {
    fn from(value: String) -> Self {
        PointValue::Symbol(value)
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointValue::Real(value) => write!(f, "{value}"),
            PointValue::Symbol(symbol) => f.write_str(symbol),
        }
    }
}

/// A mapping from variable names to coordinates.
///
/// # Examples
///
/// ```rust
/// use borel_model::point::Point;
///
/// let point = Point::new().with("x", 0.5).with("color", "RED");
/// assert!(point.get("x").is_some());
/// assert!(point.get("y").is_none());
/// ```
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Point {
    values: BTreeMap<String, PointValue>,
}

impl Point {
    /// An empty point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a coordinate, consuming and returning the point.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PointValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a coordinate in place, replacing any previous value for the
    /// name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PointValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// The coordinate for `name`, if present.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&PointValue> {
        self.values.get(name)
    }

    /// Iterates over the coordinates in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PointValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the point has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_str(")")
    }
}
