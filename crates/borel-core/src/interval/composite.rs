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

use crate::algebra::{canonical_simple_sets, cmp_simple_set_slices, CompositeSet};
use crate::bound::Bound;
use crate::interval::simple::SimpleInterval;
use crate::json::{JsonError, JsonSerializable};
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, Not, Sub};

/// A finite union of [`SimpleInterval`]s in canonical form: sorted,
/// pairwise disjoint, and simplified (no two consecutive atoms abut with a
/// closed bound at the shared endpoint).
///
/// Construction canonicalizes any collection of atoms, so two intervals
/// describing the same point set always compare equal.
///
/// # Examples
///
/// ```rust
/// use borel_core::algebra::CompositeSet;
/// use borel_core::interval::Interval;
///
/// let a = Interval::closed(0.0, 1.0);
/// let b = Interval::open(0.5, 2.0);
/// assert_eq!(a.union_with(&b), Interval::closed_open(0.0, 2.0));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Interval {
    simple_sets: Vec<SimpleInterval>,
}

impl Interval {
    /// Creates an interval from any collection of atoms.
    ///
    /// Overlapping, adjacent, duplicated, and empty atoms are all allowed;
    /// the result is canonical.
    pub fn new(simple_sets: impl IntoIterator<Item = SimpleInterval>) -> Self {
        Self {
            simple_sets: canonical_simple_sets(simple_sets.into_iter().collect()),
        }
    }

    /// The empty interval.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            simple_sets: Vec::new(),
        }
    }

    /// The open interval `(lower, upper)`.
    #[inline]
    pub fn open(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::new(lower, upper, Bound::Open, Bound::Open)])
    }

    /// The closed interval `[lower, upper]`.
    #[inline]
    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::new(
            lower,
            upper,
            Bound::Closed,
            Bound::Closed,
        )])
    }

    /// The half-open interval `(lower, upper]`.
    #[inline]
    pub fn open_closed(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::new(
            lower,
            upper,
            Bound::Open,
            Bound::Closed,
        )])
    }

    /// The half-open interval `[lower, upper)`.
    #[inline]
    pub fn closed_open(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::new(
            lower,
            upper,
            Bound::Closed,
            Bound::Open,
        )])
    }

    /// The single point `[value, value]`.
    #[inline]
    pub fn singleton(value: f64) -> Self {
        Self::closed(value, value)
    }

    /// The whole real line `(−∞, ∞)`.
    #[inline]
    pub fn reals() -> Self {
        Self {
            simple_sets: vec![SimpleInterval::reals()],
        }
    }

    /// Returns `true` if this interval contains exactly one point.
    pub fn is_singleton(&self) -> bool {
        matches!(self.simple_sets.as_slice(), [atom] if atom.is_singleton())
    }

    /// The integers contained in this interval, ascending.
    ///
    /// Atoms are disjoint and sorted, so chaining their integer ranges
    /// yields each integer at most once.
    pub fn contained_integers(&self) -> impl Iterator<Item = i64> + '_ {
        self.simple_sets
            .iter()
            .flat_map(SimpleInterval::contained_integers)
    }
}

impl CompositeSet for Interval {
    type Simple = SimpleInterval;

    fn simple_sets(&self) -> &[SimpleInterval] {
        &self.simple_sets
    }

    fn with_simple_sets(&self, simple_sets: Vec<SimpleInterval>) -> Self {
        Self::new(simple_sets)
    }

    fn ambient_simple_sets(&self) -> Vec<SimpleInterval> {
        vec![SimpleInterval::reals()]
    }
}

impl SimpleInterval {
    /// Wraps this atom in a composite [`Interval`].
    #[inline]
    pub fn as_composite_set(&self) -> Interval {
        Interval::new([*self])
    }
}

impl From<SimpleInterval> for Interval {
    fn from(atom: SimpleInterval) -> Self {
        atom.as_composite_set()
    }
}

impl PartialOrd for Interval {
    /// Lexicographic comparison of the canonical atoms; the shorter
    /// sequence sorts first on a shared prefix. Deterministic, but not a
    /// subset ordering.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_simple_set_slices(&self.simple_sets, &other.simple_sets))
    }
}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.simple_sets.hash(state);
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simple_sets.is_empty() {
            return f.write_str("∅");
        }
        for (i, atom) in self.simple_sets.iter().enumerate() {
            if i > 0 {
                f.write_str(" u ")?;
            }
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}

impl BitOr for &Interval {
    type Output = Interval;

    #[inline]
    fn bitor(self, rhs: Self) -> Interval {
        self.union_with(rhs)
    }
}

impl BitAnd for &Interval {
    type Output = Interval;

    #[inline]
    fn bitand(self, rhs: Self) -> Interval {
        self.intersection_with(rhs)
    }
}

impl Sub for &Interval {
    type Output = Interval;

    #[inline]
    fn sub(self, rhs: Self) -> Interval {
        self.difference_with(rhs)
    }
}

impl Not for &Interval {
    type Output = Interval;

    #[inline]
    fn not(self) -> Interval {
        self.complement()
    }
}

impl JsonSerializable for Interval {
    const KIND: &'static str = "interval";

    fn data_to_json(&self) -> Value {
        let simple_sets: Vec<Value> = self.simple_sets.iter().map(|s| s.to_json()).collect();
        json!({ "simple_sets": simple_sets })
    }

    fn data_from_json(data: &Value) -> Result<Self, JsonError> {
        let entries = data
            .get("simple_sets")
            .and_then(Value::as_array)
            .ok_or(JsonError::MissingField("simple_sets"))?;
        let atoms = entries
            .iter()
            .map(SimpleInterval::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(atoms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::SimpleSet;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn si(lower: f64, upper: f64, left: Bound, right: Bound) -> SimpleInterval {
        SimpleInterval::new(lower, upper, left, right)
    }

    fn open_atom(lower: f64, upper: f64) -> SimpleInterval {
        si(lower, upper, Bound::Open, Bound::Open)
    }

    /// Asserts the canonical-form invariants every operation must uphold.
    fn assert_canonical(interval: &Interval) {
        assert!(interval.is_disjoint(), "not disjoint: {interval}");
        let atoms = interval.simple_sets();
        for pair in atoms.windows(2) {
            assert_eq!(
                pair[0].total_cmp(&pair[1]),
                Ordering::Less,
                "not sorted: {interval}"
            );
            assert!(
                pair[0].try_union(&pair[1]).is_none(),
                "not simplified: {interval}"
            );
        }
    }

    #[test]
    fn test_construction_simplifies() {
        // Overlapping chain plus a detached atom.
        let interval = Interval::new([
            open_atom(3.0, 4.0),
            open_atom(0.0, 1.0),
            open_atom(0.5, 1.5),
            si(1.5, 2.0, Bound::Closed, Bound::Open),
        ]);
        let expected = Interval::new([open_atom(0.0, 2.0), open_atom(3.0, 4.0)]);
        assert_eq!(interval, expected);
        assert_canonical(&interval);
    }

    #[test]
    fn test_union_merges_across_operands() {
        let a = &Interval::closed(0.0, 1.0) | &Interval::open(0.5, 2.0);
        assert_eq!(a, Interval::closed_open(0.0, 2.0));
        assert_canonical(&a);

        let b = Interval::new([open_atom(0.0, 1.0), open_atom(3.0, 4.0)]);
        let c = Interval::new([open_atom(0.5, 1.5), si(1.5, 2.0, Bound::Closed, Bound::Open)]);
        let union = b.union_with(&c);
        assert_eq!(
            union,
            Interval::new([open_atom(0.0, 2.0), open_atom(3.0, 4.0)])
        );
        assert!(union.is_disjoint());
    }

    #[test]
    fn test_shared_endpoint_merge_policy() {
        // 1 is included on the left, so the union is one atom.
        let merged = &Interval::closed(0.0, 1.0) | &Interval::open(1.0, 2.0);
        assert_eq!(merged, Interval::closed_open(0.0, 2.0));

        // 1 is included on neither side, so the atoms stay apart.
        let split = &Interval::open(0.0, 1.0) | &Interval::open(1.0, 2.0);
        assert_eq!(split.simple_sets().len(), 2);
        assert!(!split.contains_point(&1.0));
    }

    #[test]
    fn test_intersection() {
        let a = Interval::new([open_atom(0.0, 1.0), open_atom(3.0, 4.0)]);
        let b = Interval::new([open_atom(0.5, 1.5), si(1.5, 2.0, Bound::Closed, Bound::Open)]);
        assert_eq!(a.intersection_with(&b), Interval::open(0.5, 1.0));
    }

    #[test]
    fn test_complement() {
        let a = Interval::closed(0.0, 1.0).complement();
        let expected = Interval::new([
            si(f64::NEG_INFINITY, 0.0, Bound::Open, Bound::Open),
            si(1.0, f64::INFINITY, Bound::Open, Bound::Open),
        ]);
        assert_eq!(a, expected);

        let b = Interval::new([open_atom(0.0, 1.0), open_atom(3.0, 4.0)]).complement();
        let expected = Interval::new([
            si(f64::NEG_INFINITY, 0.0, Bound::Open, Bound::Closed),
            si(1.0, 3.0, Bound::Closed, Bound::Closed),
            si(4.0, f64::INFINITY, Bound::Closed, Bound::Open),
        ]);
        assert_eq!(b, expected);
        assert_canonical(&b);
    }

    #[test]
    fn test_complement_of_empty_is_reals() {
        assert_eq!(Interval::empty().complement(), Interval::reals());
        assert_eq!(Interval::reals().complement(), Interval::empty());
    }

    #[test]
    fn test_difference() {
        let base = Interval::closed(0.0, 10.0);
        let hole = Interval::open(4.0, 6.0);
        let diff = &base - &hole;
        let expected = Interval::new([
            si(0.0, 4.0, Bound::Closed, Bound::Closed),
            si(6.0, 10.0, Bound::Closed, Bound::Closed),
        ]);
        assert_eq!(diff, expected);

        // Removing everything leaves the empty set.
        assert!(( &base - &Interval::reals()).is_empty());
    }

    #[test]
    fn test_contains_subset_and_point() {
        let a = Interval::closed(0.0, 10.0);
        let b = Interval::open(2.0, 3.0);
        assert!(a.contains(&b));
        assert!(!b.contains(&a));

        assert!(a.contains_point(&0.0));
        assert!(!a.contains_point(&10.5));

        // A ⊆ B iff A ∩ B == A iff A ∪ B == B.
        assert_eq!(a.intersection_with(&b), b);
        assert_eq!(a.union_with(&b), a);
    }

    #[test]
    fn test_partial_order_is_lexicographic() {
        let a = &Interval::open(2.0, 4.0) | &Interval::open(5.0, 6.0);
        let b = &Interval::open(3.0, 4.0) | &Interval::open(4.5, 5.5);
        assert!(a < b);
        assert!(!(b < a));
    }

    #[test]
    fn test_is_singleton() {
        assert!(Interval::singleton(2.0).is_singleton());
        assert!(!Interval::closed(0.0, 1.0).is_singleton());
        assert!(!Interval::empty().is_singleton());
    }

    #[test]
    fn test_contained_integers() {
        let a = &Interval::open(2.0, 4.0) | &Interval::closed_open(4.5, 6.0);
        assert_eq!(a.contained_integers().collect::<Vec<_>>(), vec![3, 5]);
    }

    #[test]
    fn test_display() {
        let a = Interval::new([open_atom(0.0, 1.0), open_atom(3.0, 4.0)]);
        assert_eq!(format!("{a}"), "(0, 1) u (3, 4)");
        assert_eq!(format!("{}", Interval::empty()), "∅");
    }

    #[test]
    fn test_json_round_trip() {
        for interval in [
            Interval::empty(),
            Interval::reals(),
            Interval::new([open_atom(0.0, 1.0), open_atom(3.0, 4.0)]),
            Interval::closed(-2.5, 7.0),
        ] {
            let back = Interval::from_json(&interval.to_json()).expect("round trip");
            assert_eq!(back, interval);
        }
    }

    #[test]
    fn test_json_kind_mismatch() {
        let document = Interval::empty().to_json();
        assert!(matches!(
            SimpleInterval::from_json(&document),
            Err(JsonError::KindMismatch { .. })
        ));
    }

    fn random_interval(rng: &mut ChaCha8Rng) -> Interval {
        let num_atoms = rng.random_range(0..3);
        let atoms = (0..num_atoms).map(|_| {
            let lower = rng.random_range(-8..8) as f64 * 0.5;
            let width = rng.random_range(0..6) as f64 * 0.5;
            let left = if rng.random_bool(0.5) {
                Bound::Closed
            } else {
                Bound::Open
            };
            let right = if rng.random_bool(0.5) {
                Bound::Closed
            } else {
                Bound::Open
            };
            SimpleInterval::new(lower, lower + width, left, right)
        });
        Interval::new(atoms)
    }

    /// Probes on a grid twice as fine as the random endpoints, so interior
    /// points and endpoints are both exercised.
    fn probe_points() -> impl Iterator<Item = f64> {
        (-20..=20).map(|i| i as f64 * 0.25)
    }

    #[test]
    fn test_algebra_laws_on_random_intervals() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let a = random_interval(&mut rng);
            let b = random_interval(&mut rng);
            let c = random_interval(&mut rng);

            // Idempotence.
            assert_eq!(a.union_with(&a), a);
            assert_eq!(a.intersection_with(&a), a);

            // Commutativity.
            assert_eq!(a.union_with(&b), b.union_with(&a));
            assert_eq!(a.intersection_with(&b), b.intersection_with(&a));

            // Associativity.
            assert_eq!(
                a.union_with(&b).union_with(&c),
                a.union_with(&b.union_with(&c))
            );
            assert_eq!(
                a.intersection_with(&b).intersection_with(&c),
                a.intersection_with(&b.intersection_with(&c))
            );

            // Distributivity.
            assert_eq!(
                a.intersection_with(&b.union_with(&c)),
                a.intersection_with(&b).union_with(&a.intersection_with(&c))
            );

            // De Morgan.
            assert_eq!(
                a.union_with(&b).complement(),
                a.complement().intersection_with(&b.complement())
            );
            assert_eq!(
                a.intersection_with(&b).complement(),
                a.complement().union_with(&b.complement())
            );

            // Double complement.
            assert_eq!(a.complement().complement(), a);

            // Every result is canonical.
            assert_canonical(&a.union_with(&b));
            assert_canonical(&a.intersection_with(&b));
            assert_canonical(&a.difference_with(&b));
            assert_canonical(&a.complement());

            // Point inclusion distributes over union and intersection.
            let union = a.union_with(&b);
            let intersection = a.intersection_with(&b);
            for x in probe_points() {
                assert_eq!(
                    union.contains_point(&x),
                    a.contains_point(&x) || b.contains_point(&x)
                );
                assert_eq!(
                    intersection.contains_point(&x),
                    a.contains_point(&x) && b.contains_point(&x)
                );
            }
        }
    }
}
