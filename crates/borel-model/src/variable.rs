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

//! # Variable Catalog
//!
//! Typed, totally ordered identifiers for the dimensions of a product
//! algebra. A [`Variable`] owns its domain — an [`Interval`] for continuous
//! and integer variables, a [`Set`] for symbolic ones — and compares,
//! hashes, and sorts **by name alone**, so two processes can independently
//! reconstruct structurally equal variables.
//!
//! There is no global registry. Variables are plain values, cheap to clone
//! (the name and any symbolic universe sit behind reference counts), and
//! any catalog is owned by the caller.

use crate::point::PointValue;
use borel_core::algebra::CompositeSet;
use borel_core::interval::Interval;
use borel_core::json::{JsonError, JsonSerializable};
use borel_core::symbolic::Set;
use serde_json::{json, Value};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The three families of random variables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VariableKind {
    /// Unordered, finite, discrete; the domain is a symbolic [`Set`].
    Symbolic,
    /// Ordered, discrete; the domain is `(−∞, ∞)` restricted to ℤ,
    /// represented as a continuous interval plus this flag.
    Integer,
    /// The domain is a subset of the real line, `(−∞, ∞)` by default.
    Continuous,
}

impl VariableKind {
    /// The name used on the JSON wire.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            VariableKind::Symbolic => "Symbolic",
            VariableKind::Integer => "Integer",
            VariableKind::Continuous => "Continuous",
        }
    }

    /// Parses the wire name produced by [`VariableKind::as_str`].
    #[inline]
    pub fn from_str_opt(name: &str) -> Option<Self> {
        match name {
            "Symbolic" => Some(VariableKind::Symbolic),
            "Integer" => Some(VariableKind::Integer),
            "Continuous" => Some(VariableKind::Continuous),
            _ => None,
        }
    }

    /// Returns `true` for kinds whose domain is numeric.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, VariableKind::Integer | VariableKind::Continuous)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A composite set from one of the two one-dimensional algebras.
///
/// This is the value a [`Variable`] stores per dimension: its domain, and
/// the per-variable constraint inside a simple event. Binary operations are
/// only defined between values of the same algebra; events guarantee that
/// by validating assignments against the variable's kind.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum VariableSet {
    /// A value of the interval algebra.
    Interval(Interval),
    /// A value of the symbolic-set algebra.
    Set(Set),
}

impl VariableSet {
    /// The algebra of this value (`"interval"` or `"set"`), as reported in
    /// error messages.
    #[inline]
    pub const fn algebra_name(&self) -> &'static str {
        match self {
            VariableSet::Interval(_) => "interval",
            VariableSet::Set(_) => "set",
        }
    }

    /// Returns `true` if this value is the empty set.
    pub fn is_empty(&self) -> bool {
        match self {
            VariableSet::Interval(interval) => interval.is_empty(),
            VariableSet::Set(set) => set.is_empty(),
        }
    }

    /// Pointwise union.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different algebras.
    pub fn union_with(&self, other: &Self) -> Self {
        match (self, other) {
            (VariableSet::Interval(a), VariableSet::Interval(b)) => {
                VariableSet::Interval(a.union_with(b))
            }
            (VariableSet::Set(a), VariableSet::Set(b)) => VariableSet::Set(a.union_with(b)),
            _ => panic!("Operands belong to different algebras"),
        }
    }

    /// Pointwise intersection.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different algebras.
    pub fn intersection_with(&self, other: &Self) -> Self {
        match (self, other) {
            (VariableSet::Interval(a), VariableSet::Interval(b)) => {
                VariableSet::Interval(a.intersection_with(b))
            }
            (VariableSet::Set(a), VariableSet::Set(b)) => VariableSet::Set(a.intersection_with(b)),
            _ => panic!("Operands belong to different algebras"),
        }
    }

    /// Pointwise difference.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different algebras.
    pub fn difference_with(&self, other: &Self) -> Self {
        match (self, other) {
            (VariableSet::Interval(a), VariableSet::Interval(b)) => {
                VariableSet::Interval(a.difference_with(b))
            }
            (VariableSet::Set(a), VariableSet::Set(b)) => VariableSet::Set(a.difference_with(b)),
            _ => panic!("Operands belong to different algebras"),
        }
    }

    /// Returns `true` if `self` is a subset of `other`.
    ///
    /// Values of different algebras are never subsets of one another.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        match (self, other) {
            (VariableSet::Interval(a), VariableSet::Interval(b)) => b.contains(a),
            (VariableSet::Set(a), VariableSet::Set(b)) => b.contains(a),
            _ => false,
        }
    }

    /// Returns `true` if the point value lies in this set.
    ///
    /// A real value never lies in a symbolic set and vice versa.
    pub fn contains_value(&self, value: &PointValue) -> bool {
        match (self, value) {
            (VariableSet::Interval(interval), PointValue::Real(x)) => interval.contains_point(x),
            (VariableSet::Set(set), PointValue::Symbol(symbol)) => set.contains_symbol(symbol),
            _ => false,
        }
    }

    /// Deterministic ordering used to sort simple events.
    ///
    /// Within one algebra this is the lexicographic composite order; the
    /// interval algebra sorts before the symbolic one.
    pub(crate) fn cmp_sets(&self, other: &Self) -> Ordering {
        match (self, other) {
            (VariableSet::Interval(a), VariableSet::Interval(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (VariableSet::Set(a), VariableSet::Set(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (VariableSet::Interval(_), VariableSet::Set(_)) => Ordering::Less,
            (VariableSet::Set(_), VariableSet::Interval(_)) => Ordering::Greater,
        }
    }

    /// Serializes as the wrapped composite's `{"kind", "data"}` document.
    pub fn to_json(&self) -> Value {
        match self {
            VariableSet::Interval(interval) => interval.to_json(),
            VariableSet::Set(set) => set.to_json(),
        }
    }

    /// Deserializes either composite, dispatching on the `kind` tag.
    pub fn from_json(value: &Value) -> Result<Self, JsonError> {
        match value.get("kind").and_then(Value::as_str) {
            Some(Interval::KIND) => Interval::from_json(value).map(VariableSet::Interval),
            Some(Set::KIND) => Set::from_json(value).map(VariableSet::Set),
            Some(found) => Err(JsonError::KindMismatch {
                expected: "interval or set",
                found: found.to_string(),
            }),
            None => Err(JsonError::MissingField("kind")),
        }
    }
}

impl Hash for VariableSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            VariableSet::Interval(interval) => {
                0u8.hash(state);
                interval.hash(state);
            }
            VariableSet::Set(set) => {
                1u8.hash(state);
                set.hash(state);
            }
        }
    }
}

impl fmt::Display for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableSet::Interval(interval) => write!(f, "{interval}"),
            VariableSet::Set(set) => write!(f, "{set}"),
        }
    }
}

impl From<Interval> for VariableSet {
    fn from(interval: Interval) -> Self {
        VariableSet::Interval(interval)
    }
}

impl From<Set> for VariableSet {
    fn from(set: Set) -> Self {
        VariableSet::Set(set)
    }
}

/// A named dimension of the product algebra.
///
/// Equality, ordering, and hashing use the name alone; the kind and domain
/// are payload. Cloning is cheap: the name is reference counted.
///
/// # Examples
///
/// ```rust
/// use borel_model::variable::Variable;
///
/// let x = Variable::continuous("x");
/// let also_x = Variable::continuous("x");
/// assert_eq!(x, also_x);
/// assert!(x < Variable::continuous("y"));
/// ```
#[derive(Clone, Debug)]
pub struct Variable {
    name: Arc<str>,
    kind: VariableKind,
    domain: VariableSet,
}

impl Variable {
    /// A continuous variable with domain `(−∞, ∞)`.
    pub fn continuous(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Continuous,
            domain: VariableSet::Interval(Interval::reals()),
        }
    }

    /// An integer variable with domain `(−∞, ∞)` restricted to ℤ.
    ///
    /// The restriction lives in the kind flag; the stored interval stays
    /// continuous so that no range is ever enumerated.
    pub fn integer(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Integer,
            domain: VariableSet::Interval(Interval::reals()),
        }
    }

    /// A symbolic variable with the given finite domain.
    pub fn symbolic(name: impl Into<Arc<str>>, domain: Set) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Symbolic,
            domain: VariableSet::Set(domain),
        }
    }

    /// The name of this variable.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of this variable.
    #[inline]
    pub const fn kind(&self) -> VariableKind {
        self.kind
    }

    /// The full domain of this variable.
    #[inline]
    pub const fn domain(&self) -> &VariableSet {
        &self.domain
    }

    /// Serializes as `{"name", "kind", "domain"}` with the domain document
    /// nested recursively.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name.as_ref(),
            "kind": self.kind.as_str(),
            "domain": self.domain.to_json(),
        })
    }

    /// Deserializes a variable, verifying that the domain's algebra matches
    /// the kind.
    pub fn from_json(value: &Value) -> Result<Self, JsonError> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or(JsonError::MissingField("name"))?;
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .and_then(VariableKind::from_str_opt)
            .ok_or(JsonError::MissingField("kind"))?;
        let domain_value = value.get("domain").ok_or(JsonError::MissingField("domain"))?;
        let domain = VariableSet::from_json(domain_value)?;
        let matches_kind = match (&domain, kind) {
            (VariableSet::Set(_), VariableKind::Symbolic) => true,
            (VariableSet::Interval(_), VariableKind::Integer | VariableKind::Continuous) => true,
            _ => false,
        };
        if !matches_kind {
            return Err(JsonError::InvalidValue {
                field: "domain",
                message: format!(
                    "a {kind} variable cannot have a domain of type '{}'",
                    domain.algebra_name()
                ),
            });
        }
        Ok(Self {
            name: Arc::from(name),
            kind,
            domain,
        })
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Borrow<str> for Variable {
    // Lookup by bare name in ordered maps; consistent because equality and
    // ordering already use the name alone.
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.name)
    }
}
