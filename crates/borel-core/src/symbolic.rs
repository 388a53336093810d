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

//! # Symbolic-Set Algebra
//!
//! The finite instantiation of the abstract set algebra: atoms are single
//! symbols drawn from a fixed, ordered [`Universe`], composites are sorted
//! sets of distinct symbols. The universe travels with every value (shared
//! behind an `Arc`) because the complement is only defined relative to it.
//!
//! Universes are non-empty and duplicate-free by construction, so a
//! complement can never be requested against an unspecified ambient space.
//! Operands of a binary operation must share one universe; the checked
//! `try_*` constructors report [`SetError`] variants, while the operations
//! themselves treat a mismatch as a contract violation and panic.

use crate::algebra::{canonical_simple_sets, cmp_simple_set_slices, CompositeSet, SimpleSet};
use crate::json::{JsonError, JsonSerializable};
use serde_json::{json, Value};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, Not, Sub};
use std::sync::Arc;

/// The error type for symbolic-set construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// A universe must contain at least one symbol.
    EmptyUniverse,
    /// A universe must not contain the same symbol twice.
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },
    /// The symbol is not part of the universe.
    UnknownSymbol {
        /// The symbol that was looked up.
        symbol: String,
    },
    /// The index does not address a universe element.
    IndexOutOfRange {
        /// The index that was looked up.
        index: usize,
        /// The number of symbols in the universe.
        len: usize,
    },
    /// Two values from different universes were combined.
    UniverseMismatch,
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUniverse => write!(f, "A universe must contain at least one symbol"),
            Self::DuplicateSymbol { symbol } => {
                write!(f, "Symbol '{symbol}' appears twice in the universe")
            }
            Self::UnknownSymbol { symbol } => {
                write!(f, "Symbol '{symbol}' is not part of the universe")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} is out of range for a universe of {len} symbols")
            }
            Self::UniverseMismatch => write!(f, "Operands belong to different universes"),
        }
    }
}

impl std::error::Error for SetError {}

/// A fixed, ordered collection of distinct symbols: the ambient space of a
/// symbolic algebra.
///
/// # Examples
///
/// ```rust
/// use borel_core::symbolic::Universe;
///
/// let weather = Universe::try_new(["SUN", "RAIN", "SNOW"]).unwrap();
/// assert_eq!(weather.len(), 3);
/// assert_eq!(weather.index_of("RAIN"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Universe {
    symbols: Vec<String>,
}

impl Universe {
    /// Creates a universe from an ordered collection of symbols.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::EmptyUniverse`] for zero symbols and
    /// [`SetError::DuplicateSymbol`] if a symbol repeats.
    pub fn try_new<I, S>(symbols: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(SetError::EmptyUniverse);
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(SetError::DuplicateSymbol {
                    symbol: symbol.clone(),
                });
            }
        }
        Ok(Self { symbols })
    }

    /// The number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// All symbols in universe order.
    #[inline]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The symbol at `index`, if any.
    #[inline]
    pub fn symbol(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    /// The index of `symbol`, if it is part of this universe.
    #[inline]
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

#[inline]
fn assert_same_universe(a: &Arc<Universe>, b: &Arc<Universe>) {
    assert!(
        Arc::ptr_eq(a, b) || a == b,
        "Operands belong to different universes"
    );
}

/// A single symbol of a [`Universe`], or the empty sentinel.
///
/// The element is stored as an index into the universe; the empty sentinel
/// (the result of intersecting two distinct symbols) carries no index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetElement {
    universe: Arc<Universe>,
    index: Option<usize>,
}

impl SetElement {
    /// Creates the element for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnknownSymbol`] if the universe does not contain
    /// the symbol.
    pub fn try_new(universe: &Arc<Universe>, symbol: &str) -> Result<Self, SetError> {
        let index = universe
            .index_of(symbol)
            .ok_or_else(|| SetError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;
        Ok(Self {
            universe: Arc::clone(universe),
            index: Some(index),
        })
    }

    /// Creates the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::IndexOutOfRange`] if `index` does not address a
    /// universe element.
    pub fn from_index(universe: &Arc<Universe>, index: usize) -> Result<Self, SetError> {
        if index >= universe.len() {
            return Err(SetError::IndexOutOfRange {
                index,
                len: universe.len(),
            });
        }
        Ok(Self {
            universe: Arc::clone(universe),
            index: Some(index),
        })
    }

    /// The empty sentinel over `universe`.
    #[inline]
    pub fn empty(universe: &Arc<Universe>) -> Self {
        Self {
            universe: Arc::clone(universe),
            index: None,
        }
    }

    /// The universe this element belongs to.
    #[inline]
    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    /// The index of this element, or `None` for the empty sentinel.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The symbol of this element, or `None` for the empty sentinel.
    #[inline]
    pub fn symbol(&self) -> Option<&str> {
        self.index.and_then(|i| self.universe.symbol(i))
    }
}

impl SimpleSet for SetElement {
    type Point = str;

    /// Two symbols intersect to themselves when equal and to the empty
    /// sentinel otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different universes.
    fn intersection_with(&self, other: &Self) -> Self {
        assert_same_universe(&self.universe, &other.universe);
        if self.index == other.index {
            self.clone()
        } else {
            Self::empty(&self.universe)
        }
    }

    /// Every other symbol of the universe, one atom each. The complement of
    /// the empty sentinel is the whole universe.
    fn complement(&self) -> SmallVec<Self, 2> {
        (0..self.universe.len())
            .filter(|&i| Some(i) != self.index)
            .map(|i| Self {
                universe: Arc::clone(&self.universe),
                index: Some(i),
            })
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.index.is_none()
    }

    fn contains(&self, point: &str) -> bool {
        self.symbol() == Some(point)
    }

    /// Sorts by universe index, empty sentinel first.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different universes.
    fn total_cmp(&self, other: &Self) -> Ordering {
        assert_same_universe(&self.universe, &other.universe);
        self.index.cmp(&other.index)
    }

    /// Atoms over a finite universe only merge when they are the same
    /// symbol (or one side is empty); a sorted list of distinct symbols is
    /// already simplified.
    fn try_union(&self, other: &Self) -> Option<Self> {
        if self.is_empty() {
            return Some(other.clone());
        }
        if other.is_empty() || self == other {
            return Some(self.clone());
        }
        None
    }
}

impl Hash for SetElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.universe.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for SetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => f.write_str("∅"),
        }
    }
}

impl JsonSerializable for SetElement {
    const KIND: &'static str = "set_element";

    fn data_to_json(&self) -> Value {
        let index = self.index.map_or(-1, |i| i as i64);
        json!({ "index": index, "universe": self.universe.symbols() })
    }

    fn data_from_json(data: &Value) -> Result<Self, JsonError> {
        let universe = universe_from_json(data.get("universe"))?;
        let index = data
            .get("index")
            .and_then(Value::as_i64)
            .ok_or(JsonError::MissingField("index"))?;
        if index < 0 {
            return Ok(Self::empty(&universe));
        }
        Self::from_index(&universe, index as usize).map_err(|error| JsonError::InvalidValue {
            field: "index",
            message: error.to_string(),
        })
    }
}

fn universe_from_json(value: Option<&Value>) -> Result<Arc<Universe>, JsonError> {
    let symbols = value
        .and_then(Value::as_array)
        .ok_or(JsonError::MissingField("universe"))?;
    let symbols = symbols
        .iter()
        .map(|s| {
            s.as_str()
                .map(str::to_string)
                .ok_or(JsonError::MissingField("universe"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Universe::try_new(symbols)
        .map(Arc::new)
        .map_err(|error| JsonError::InvalidValue {
            field: "universe",
            message: error.to_string(),
        })
}

/// A sorted set of distinct symbols from one [`Universe`].
///
/// # Examples
///
/// ```rust
/// use borel_core::algebra::CompositeSet;
/// use borel_core::symbolic::Set;
///
/// let fruit = Set::from_iterable(["APPLE", "PEAR", "PLUM"]).unwrap();
/// let apple = Set::try_from_symbols(fruit.universe(), ["APPLE"]).unwrap();
/// let rest = apple.complement();
/// assert_eq!(rest.symbols().collect::<Vec<_>>(), vec!["PEAR", "PLUM"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    universe: Arc<Universe>,
    simple_sets: Vec<SetElement>,
}

impl Set {
    /// Creates a set over `universe` from any collection of its elements.
    ///
    /// Duplicates and empty sentinels are allowed; the result is canonical.
    ///
    /// # Panics
    ///
    /// Panics if an element belongs to a different universe.
    pub fn new(universe: &Arc<Universe>, elements: impl IntoIterator<Item = SetElement>) -> Self {
        let elements: Vec<SetElement> = elements.into_iter().collect();
        for element in &elements {
            assert_same_universe(universe, element.universe());
        }
        Self {
            universe: Arc::clone(universe),
            simple_sets: canonical_simple_sets(elements),
        }
    }

    /// The empty set over `universe`.
    #[inline]
    pub fn empty(universe: &Arc<Universe>) -> Self {
        Self {
            universe: Arc::clone(universe),
            simple_sets: Vec::new(),
        }
    }

    /// The set containing every symbol of `universe`.
    pub fn full(universe: &Arc<Universe>) -> Self {
        let elements = (0..universe.len()).map(|index| SetElement {
            universe: Arc::clone(universe),
            index: Some(index),
        });
        Self {
            universe: Arc::clone(universe),
            simple_sets: elements.collect(),
        }
    }

    /// Builds a fresh universe from `symbols` and returns the set
    /// containing all of them.
    ///
    /// # Errors
    ///
    /// Returns the [`SetError`] of the universe construction.
    pub fn from_iterable<I, S>(symbols: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let universe = Arc::new(Universe::try_new(symbols)?);
        Ok(Self::full(&universe))
    }

    /// Creates the subset of `universe` containing exactly `symbols`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnknownSymbol`] for a symbol outside the
    /// universe.
    pub fn try_from_symbols<'a, I>(universe: &Arc<Universe>, symbols: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let elements = symbols
            .into_iter()
            .map(|symbol| SetElement::try_new(universe, symbol))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(universe, elements))
    }

    /// The universe this set draws from.
    #[inline]
    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    /// The symbols of this set in universe order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.simple_sets.iter().filter_map(SetElement::symbol)
    }

    /// Returns `true` if `symbol` is an element of this set.
    #[inline]
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.contains_point(symbol)
    }
}

impl CompositeSet for Set {
    type Simple = SetElement;

    fn simple_sets(&self) -> &[SetElement] {
        &self.simple_sets
    }

    fn with_simple_sets(&self, simple_sets: Vec<SetElement>) -> Self {
        Self::new(&self.universe, simple_sets)
    }

    fn ambient_simple_sets(&self) -> Vec<SetElement> {
        Self::full(&self.universe).simple_sets
    }
}

impl SetElement {
    /// Wraps this atom in a composite [`Set`].
    pub fn as_composite_set(&self) -> Set {
        Set::new(&self.universe, [self.clone()])
    }
}

impl PartialOrd for Set {
    /// Lexicographic comparison of the canonical atoms. Only defined
    /// between sets over one universe.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.universe != other.universe {
            return None;
        }
        Some(cmp_simple_set_slices(&self.simple_sets, &other.simple_sets))
    }
}

impl Hash for Set {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.universe.hash(state);
        for element in &self.simple_sets {
            element.index().hash(state);
        }
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simple_sets.is_empty() {
            return f.write_str("∅");
        }
        f.write_str("{")?;
        for (i, element) in self.simple_sets.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("}")
    }
}

impl BitOr for &Set {
    type Output = Set;

    #[inline]
    fn bitor(self, rhs: Self) -> Set {
        self.union_with(rhs)
    }
}

impl BitAnd for &Set {
    type Output = Set;

    #[inline]
    fn bitand(self, rhs: Self) -> Set {
        self.intersection_with(rhs)
    }
}

impl Sub for &Set {
    type Output = Set;

    #[inline]
    fn sub(self, rhs: Self) -> Set {
        self.difference_with(rhs)
    }
}

impl Not for &Set {
    type Output = Set;

    #[inline]
    fn not(self) -> Set {
        self.complement()
    }
}

impl JsonSerializable for Set {
    const KIND: &'static str = "set";

    fn data_to_json(&self) -> Value {
        let simple_sets: Vec<Value> = self.simple_sets.iter().map(|e| e.to_json()).collect();
        json!({ "universe": self.universe.symbols(), "simple_sets": simple_sets })
    }

    fn data_from_json(data: &Value) -> Result<Self, JsonError> {
        let universe = universe_from_json(data.get("universe"))?;
        let entries = data
            .get("simple_sets")
            .and_then(Value::as_array)
            .ok_or(JsonError::MissingField("simple_sets"))?;
        let mut elements = Vec::with_capacity(entries.len());
        for entry in entries {
            let element = SetElement::from_json(entry)?;
            if element.universe() != &universe {
                return Err(JsonError::InvalidValue {
                    field: "simple_sets",
                    message: SetError::UniverseMismatch.to_string(),
                });
            }
            // Re-anchor on the shared universe so the set holds one Arc.
            let element = match element.index() {
                Some(index) => SetElement {
                    universe: Arc::clone(&universe),
                    index: Some(index),
                },
                None => SetElement::empty(&universe),
            };
            elements.push(element);
        }
        Ok(Self::new(&universe, elements))
    }
}
