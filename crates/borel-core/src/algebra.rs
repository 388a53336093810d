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

//! # Abstract Set Algebra
//!
//! The two capability traits that every concrete algebra in this workspace
//! instantiates, together with the algorithms that are generic in the atom
//! type.
//!
//! A [`SimpleSet`] is an irreducible atom: a single interval, a single
//! symbol, or a single Cartesian product of per-variable sets. A
//! [`CompositeSet`] is a finite union of atoms kept in *canonical form*:
//! sorted, pairwise disjoint, and simplified (no two consecutive atoms can
//! be merged into one). Canonical form makes equality and hashing decidable
//! by plain structural comparison.
//!
//! ## Algorithms
//!
//! - [`make_disjoint`] turns an overlapping collection of atoms into an
//!   equal disjoint collection by repeatedly splitting off the singly
//!   covered parts.
//! - [`simplify`] merges consecutive sorted atoms whose union is again a
//!   single atom.
//! - [`canonical_simple_sets`] is the composition used by every composite
//!   constructor: drop empties, disjointify, simplify, sort.
//!
//! All binary composite operations ([`CompositeSet::union_with`],
//! [`CompositeSet::intersection_with`], [`CompositeSet::difference_with`],
//! [`CompositeSet::complement`]) are provided as default methods on top of
//! the atom contract, so a concrete algebra only supplies its atoms, its
//! ambient space, and a canonicalizing rebuild hook.

use smallvec::SmallVec;
use std::cmp::Ordering;

/// An irreducible element of a set algebra.
///
/// Implementors provide intersection, complement, emptiness, membership and
/// a total order; set difference has a generic implementation in terms of
/// the complement. The total order must be consistent with `PartialEq` and
/// must sort atoms so that overlap is detectable between neighbours (for
/// intervals: by lower endpoint, `CLOSED` before `OPEN` at ties).
pub trait SimpleSet: Sized + Clone + PartialEq {
    /// The type of points this atom can contain.
    type Point: ?Sized;

    /// Returns the set-theoretic intersection with `other`.
    ///
    /// The result may be the empty atom.
    fn intersection_with(&self, other: &Self) -> Self;

    /// Returns a small disjoint collection whose union is the complement of
    /// this atom in the ambient space.
    ///
    /// For intervals this has at most two elements, for symbolic atoms at
    /// most the universe size, for product atoms at most one element per
    /// variable.
    fn complement(&self) -> SmallVec<Self, 2>;

    /// Returns `true` if this atom is the empty set.
    fn is_empty(&self) -> bool;

    /// Returns `true` if `point` is an element of this atom.
    fn contains(&self, point: &Self::Point) -> bool;

    /// Total order used for canonical sorting.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Attempts to merge two atoms into one.
    ///
    /// Returns `Some` exactly when the set union of `self` and `other` is
    /// again representable as a single atom; returns `None` otherwise.
    /// [`simplify`] calls this on consecutive sorted atoms.
    fn try_union(&self, other: &Self) -> Option<Self>;

    /// Returns `self` minus `other` as a disjoint collection of atoms.
    ///
    /// The generic implementation intersects `self` with every piece of the
    /// complement of `other`; the pieces are disjoint, so the results are
    /// disjoint too.
    fn difference_with(&self, other: &Self) -> SmallVec<Self, 2> {
        other
            .complement()
            .iter()
            .map(|piece| self.intersection_with(piece))
            .filter(|piece| !piece.is_empty())
            .collect()
    }
}

/// A finite union of [`SimpleSet`]s in canonical form.
///
/// Implementors store their atoms sorted, disjoint, and simplified, and
/// rebuild through [`CompositeSet::with_simple_sets`], which re-establishes
/// canonical form from an arbitrary collection. All set operations are
/// default methods; the results are always canonical.
pub trait CompositeSet: Sized + Clone {
    /// The atom type of this algebra.
    type Simple: SimpleSet;

    /// The canonical atoms of this composite, sorted and disjoint.
    fn simple_sets(&self) -> &[Self::Simple];

    /// Rebuilds a composite of the same algebra from raw atoms.
    ///
    /// `self` only contributes context that the atoms alone cannot carry
    /// (such as the universe of a symbolic set); the atoms are
    /// canonicalized by the implementation.
    fn with_simple_sets(&self, simple_sets: Vec<Self::Simple>) -> Self;

    /// The atoms of the ambient space this algebra complements against.
    fn ambient_simple_sets(&self) -> Vec<Self::Simple>;

    /// Returns the union of `self` and `other`.
    fn union_with(&self, other: &Self) -> Self {
        let mut all = self.simple_sets().to_vec();
        all.extend_from_slice(other.simple_sets());
        self.with_simple_sets(all)
    }

    /// Returns the intersection of `self` and `other`.
    ///
    /// Every atom of `self` is intersected with every atom of `other`;
    /// empty results are discarded.
    fn intersection_with(&self, other: &Self) -> Self {
        let mut pieces = Vec::new();
        for a in self.simple_sets() {
            for b in other.simple_sets() {
                let shared = a.intersection_with(b);
                if !shared.is_empty() {
                    pieces.push(shared);
                }
            }
        }
        self.with_simple_sets(pieces)
    }

    /// Returns `self` minus `other`.
    ///
    /// Each atom of `self` is whittled down by every atom of `other` in
    /// turn; the surviving pieces form the result.
    fn difference_with(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        for a in self.simple_sets() {
            let mut pieces: Vec<Self::Simple> = vec![a.clone()];
            for b in other.simple_sets() {
                pieces = pieces
                    .iter()
                    .flat_map(|piece| piece.difference_with(b))
                    .collect();
                if pieces.is_empty() {
                    break;
                }
            }
            out.extend(pieces);
        }
        self.with_simple_sets(out)
    }

    /// Returns the complement of `self` in the ambient space.
    ///
    /// The complement of a union is the intersection of the atom-level
    /// complements; the fold below computes it one atom at a time. The
    /// complement of the empty composite is the ambient space itself.
    fn complement(&self) -> Self {
        let mut atoms = self.simple_sets().iter();
        let mut acc = match atoms.next() {
            None => return self.with_simple_sets(self.ambient_simple_sets()),
            Some(first) => self.with_simple_sets(first.complement().into_iter().collect()),
        };
        for atom in atoms {
            let piece = self.with_simple_sets(atom.complement().into_iter().collect());
            acc = acc.intersection_with(&piece);
        }
        acc
    }

    /// Returns this composite reduced to canonical form.
    ///
    /// Composites are canonical by construction, so this is the identity on
    /// values built through the public constructors; it is exposed so the
    /// reduction can be requested explicitly.
    fn make_disjoint(&self) -> Self {
        self.with_simple_sets(self.simple_sets().to_vec())
    }

    /// Returns `true` if `other` is a subset of `self`.
    fn contains(&self, other: &Self) -> bool {
        other.difference_with(self).is_empty()
    }

    /// Returns `true` if `point` is an element of any atom.
    fn contains_point(&self, point: &<Self::Simple as SimpleSet>::Point) -> bool {
        self.simple_sets().iter().any(|atom| atom.contains(point))
    }

    /// Returns `true` if this composite is the empty set.
    ///
    /// Canonical composites contain no empty atoms, so this is a length
    /// check.
    fn is_empty(&self) -> bool {
        self.simple_sets().is_empty()
    }

    /// Returns `true` if the stored atoms are pairwise disjoint.
    ///
    /// Always `true` for canonical values; exposed so that it can be
    /// asserted.
    fn is_disjoint(&self) -> bool {
        let atoms = self.simple_sets();
        for (i, a) in atoms.iter().enumerate() {
            for b in &atoms[i + 1..] {
                if !a.intersection_with(b).is_empty() {
                    return false;
                }
            }
        }
        true
    }
}

/// One pass of the disjointification: separates the input into the parts
/// covered exactly once and the pairwise overlaps that still need work.
///
/// For each atom `a`, the part of `a` not covered by any other atom is
/// emitted into the disjoint output; the intersections of `a` with every
/// *later* atom are collected for the next pass (later only, so that each
/// overlap is recorded once).
fn split<S: SimpleSet>(simple_sets: &[S]) -> (Vec<S>, Vec<S>) {
    let mut disjoint = Vec::new();
    let mut overlaps = Vec::new();

    for (i, a) in simple_sets.iter().enumerate() {
        let mut remainder: Vec<S> = vec![a.clone()];
        for (j, b) in simple_sets.iter().enumerate() {
            if i == j {
                continue;
            }
            if j > i {
                let shared = a.intersection_with(b);
                if !shared.is_empty() {
                    overlaps.push(shared);
                }
            }
            if !remainder.is_empty() {
                remainder = remainder
                    .iter()
                    .flat_map(|piece| piece.difference_with(b))
                    .collect();
            }
        }
        disjoint.extend(remainder);
    }

    // Identical overlap pieces must collapse, otherwise duplicated atoms
    // would reappear in every pass and the fixed point would never be
    // reached.
    overlaps.sort_by(S::total_cmp);
    overlaps.dedup();

    (disjoint, overlaps)
}

/// Transforms an overlapping collection of atoms into an equal, pairwise
/// disjoint collection.
///
/// Each pass strictly reduces the coverage multiplicity of every point, so
/// the overlap queue drains after at most `n - 1` passes. The result is
/// sorted but not yet simplified.
pub fn make_disjoint<S: SimpleSet>(simple_sets: Vec<S>) -> Vec<S> {
    let (mut disjoint, mut overlaps) = split(&simple_sets);
    while !overlaps.is_empty() {
        let (settled, remaining) = split(&overlaps);
        disjoint.extend(settled);
        overlaps = remaining;
    }
    disjoint.sort_by(S::total_cmp);
    disjoint
}

/// Merges consecutive sorted atoms whose union is a single atom.
///
/// Passes repeat until no merge fires, so chains of mergeable atoms
/// collapse completely regardless of how the merges cascade.
pub fn simplify<S: SimpleSet>(mut simple_sets: Vec<S>) -> Vec<S> {
    loop {
        simple_sets.sort_by(S::total_cmp);
        let mut merged_any = false;
        let mut out: Vec<S> = Vec::with_capacity(simple_sets.len());
        for atom in simple_sets {
            if let Some(last) = out.last_mut() {
                if let Some(merged) = last.try_union(&atom) {
                    *last = merged;
                    merged_any = true;
                    continue;
                }
            }
            out.push(atom);
        }
        simple_sets = out;
        if !merged_any {
            return simple_sets;
        }
    }
}

/// Reduces raw atoms to canonical form: empties dropped, the rest made
/// disjoint, simplified, and sorted.
pub fn canonical_simple_sets<S: SimpleSet>(simple_sets: Vec<S>) -> Vec<S> {
    let non_empty: Vec<S> = simple_sets
        .into_iter()
        .filter(|atom| !atom.is_empty())
        .collect();
    simplify(make_disjoint(non_empty))
}

/// Lexicographic comparison of two canonical atom sequences.
///
/// Atoms are compared pairwise in order; on a shared prefix the shorter
/// sequence sorts first. This is the order composites expose through
/// `PartialOrd` for deterministic sorting.
pub fn cmp_simple_set_slices<S: SimpleSet>(a: &[S], b: &[S]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}
