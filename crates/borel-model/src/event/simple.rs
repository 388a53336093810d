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

use crate::error::EventError;
use crate::point::Point;
use crate::variable::{Variable, VariableKind, VariableSet};
use borel_core::algebra::SimpleSet;
use borel_core::json::{JsonError, JsonSerializable};
use serde_json::{json, Value};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One Cartesian product of per-variable sets: the atom of the product
/// algebra.
///
/// A simple event assigns each of its variables a composite set from that
/// variable's algebra; variables it does not mention are conceptually bound
/// to their full domain. Assignments are validated on entry: the value's
/// algebra must match the variable's kind, and the value must be contained
/// in the variable's domain.
///
/// A simple event with no assignments is the whole space. A simple event is
/// *empty* as soon as one assignment is the empty set.
///
/// # Examples
///
/// ```rust
/// use borel_core::algebra::SimpleSet;
/// use borel_core::interval::Interval;
/// use borel_model::event::SimpleEvent;
/// use borel_model::point::Point;
/// use borel_model::variable::Variable;
///
/// let x = Variable::continuous("x");
/// let mut event = SimpleEvent::new();
/// event.try_insert(x, Interval::closed(0.0, 1.0)).unwrap();
/// assert!(event.contains(&Point::new().with("x", 0.5)));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SimpleEvent {
    assignments: BTreeMap<Variable, VariableSet>,
}

impl SimpleEvent {
    /// The unconstrained simple event (the whole space).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a simple event from `(variable, value)` pairs, validating
    /// each assignment.
    ///
    /// # Errors
    ///
    /// Returns the first [`EventError`] an assignment produces.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Variable, VariableSet)>,
    ) -> Result<Self, EventError> {
        let mut event = Self::new();
        for (variable, value) in entries {
            event.try_insert(variable, value)?;
        }
        Ok(event)
    }

    /// Wraps an assignment map whose entries are already known to satisfy
    /// the kind, universe, and domain checks.
    pub(crate) fn from_validated(assignments: BTreeMap<Variable, VariableSet>) -> Self {
        Self { assignments }
    }

    /// Assigns `value` to `variable`, replacing any previous assignment.
    ///
    /// # Errors
    ///
    /// - [`EventError::TypeMismatch`] if the value's algebra does not match
    ///   the variable's kind.
    /// - [`EventError::UniverseMismatch`] if a symbolic value draws from a
    ///   different universe than the variable's domain.
    /// - [`EventError::DomainEscape`] if the value is not contained in the
    ///   variable's domain.
    pub fn try_insert(
        &mut self,
        variable: Variable,
        value: impl Into<VariableSet>,
    ) -> Result<(), EventError> {
        let value = value.into();
        self.check_kind_and_universe(&variable, &value)?;
        if !value.is_subset_of(variable.domain()) {
            return Err(EventError::DomainEscape {
                variable: variable.name().to_string(),
            });
        }
        self.assignments.insert(variable, value);
        Ok(())
    }

    /// Assigns the part of `value` that lies inside the variable's domain,
    /// instead of rejecting values that escape it.
    ///
    /// # Errors
    ///
    /// Kind and universe mismatches are still rejected; only the domain
    /// check is replaced by clipping.
    pub fn insert_clipped(
        &mut self,
        variable: Variable,
        value: impl Into<VariableSet>,
    ) -> Result<(), EventError> {
        let value = value.into();
        self.check_kind_and_universe(&variable, &value)?;
        let clipped = value.intersection_with(variable.domain());
        self.assignments.insert(variable, clipped);
        Ok(())
    }

    fn check_kind_and_universe(
        &self,
        variable: &Variable,
        value: &VariableSet,
    ) -> Result<(), EventError> {
        match (variable.kind(), value) {
            (VariableKind::Symbolic, VariableSet::Set(set)) => {
                let domain_universe = match variable.domain() {
                    VariableSet::Set(domain) => domain.universe(),
                    VariableSet::Interval(_) => {
                        // Symbolic variables are constructed with set
                        // domains; nothing else can exist.
                        unreachable!("symbolic variable with interval domain")
                    }
                };
                if set.universe() != domain_universe {
                    return Err(EventError::UniverseMismatch {
                        variable: variable.name().to_string(),
                    });
                }
                Ok(())
            }
            (VariableKind::Integer | VariableKind::Continuous, VariableSet::Interval(_)) => Ok(()),
            (kind, value) => Err(EventError::TypeMismatch {
                variable: variable.name().to_string(),
                expected: kind,
                found: value.algebra_name(),
            }),
        }
    }

    /// The constrained variables in name order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.assignments.keys()
    }

    /// The `(variable, value)` pairs in name order.
    pub fn assignments(&self) -> impl Iterator<Item = (&Variable, &VariableSet)> {
        self.assignments.iter()
    }

    /// The number of constrained variables.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if no variable is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.assignments.is_empty()
    }

    /// The assignment for `variable`, if it is constrained.
    pub fn assignment(&self, variable: &Variable) -> Option<&VariableSet> {
        self.assignments.get(variable)
    }

    /// The assignment for the variable called `name`, if it is constrained.
    pub fn assignment_named(&self, name: &str) -> Option<&VariableSet> {
        self.assignments.get(name)
    }

    /// The assignment for `variable`, falling back to its full domain.
    pub fn assignment_or_domain(&self, variable: &Variable) -> VariableSet {
        self.assignments
            .get(variable)
            .cloned()
            .unwrap_or_else(|| variable.domain().clone())
    }

    /// Returns a copy with every variable of `variables` present, missing
    /// ones bound to their full domain.
    ///
    /// Aligning two simple events onto the union of their variables is the
    /// first step of every binary operation.
    pub fn fill_missing(&self, variables: impl IntoIterator<Item = Variable>) -> Self {
        let mut assignments = self.assignments.clone();
        for variable in variables {
            if !assignments.contains_key(&variable) {
                let domain = variable.domain().clone();
                assignments.insert(variable, domain);
            }
        }
        Self { assignments }
    }

    /// The projection onto `variables`: constraints on any other variable
    /// are dropped.
    pub fn marginal<'a>(&self, variables: impl IntoIterator<Item = &'a Variable>) -> Self {
        let keep: BTreeSet<&str> = variables.into_iter().map(Variable::name).collect();
        let assignments = self
            .assignments
            .iter()
            .filter(|(variable, _)| keep.contains(variable.name()))
            .map(|(variable, value)| (variable.clone(), value.clone()))
            .collect();
        Self { assignments }
    }
}

impl SimpleSet for SimpleEvent {
    type Point = Point;

    /// Variable-wise intersection over the union of both variable sets;
    /// missing variables contribute their full domain.
    fn intersection_with(&self, other: &Self) -> Self {
        let mut variables: BTreeSet<Variable> = self.assignments.keys().cloned().collect();
        variables.extend(other.assignments.keys().cloned());

        let assignments = variables
            .into_iter()
            .map(|variable| {
                let a = self.assignment_or_domain(&variable);
                let b = other.assignment_or_domain(&variable);
                let value = a.intersection_with(&b);
                (variable, value)
            })
            .collect();
        Self { assignments }
    }

    /// The linear complement: one simple event per variable instead of the
    /// exponential expansion.
    ///
    /// With variables `v₁ < v₂ < … < vₙ` and assignments `Aᵢ`, the `k`-th
    /// piece constrains `v₁ … v_{k−1}` to `A₁ … A_{k−1}`, constrains `vₖ`
    /// to `domain(vₖ) − Aₖ`, and binds every later variable to its full
    /// domain. The pieces are pairwise disjoint (they differ at the first
    /// complemented variable) and their union is exactly the complement.
    /// Pieces whose complemented coordinate is empty are dropped, so at
    /// most `n` simple events are produced.
    fn complement(&self) -> SmallVec<Self, 2> {
        let variables: Vec<&Variable> = self.assignments.keys().collect();
        let mut pieces = SmallVec::new();

        for (k, &complemented) in variables.iter().enumerate() {
            let value = &self.assignments[complemented];
            let flipped = complemented.domain().difference_with(value);
            if flipped.is_empty() {
                continue;
            }

            let assignments = variables
                .iter()
                .enumerate()
                .map(|(i, &variable)| {
                    let set = match i.cmp(&k) {
                        Ordering::Less => self.assignments[variable].clone(),
                        Ordering::Equal => flipped.clone(),
                        Ordering::Greater => variable.domain().clone(),
                    };
                    (variable.clone(), set)
                })
                .collect();
            pieces.push(Self { assignments });
        }

        pieces
    }

    /// A simple event is empty as soon as one coordinate is empty.
    fn is_empty(&self) -> bool {
        self.assignments.values().any(VariableSet::is_empty)
    }

    /// A point lies in the event if every constrained variable has a
    /// coordinate inside its assigned set. A point that omits a constrained
    /// variable is not contained.
    fn contains(&self, point: &Point) -> bool {
        self.assignments.iter().all(|(variable, value)| {
            point
                .get(variable.name())
                .is_some_and(|coordinate| value.contains_value(coordinate))
        })
    }

    /// Lexicographic over the name-ordered assignments, shorter event
    /// first on a shared prefix.
    fn total_cmp(&self, other: &Self) -> Ordering {
        for ((va, sa), (vb, sb)) in self.assignments.iter().zip(other.assignments.iter()) {
            match va.name().cmp(vb.name()) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
            match sa.cmp_sets(sb) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.assignments.len().cmp(&other.assignments.len())
    }

    /// Two simple events merge when they agree on all variables except at
    /// most one; the merged event takes the variable-wise union there.
    fn try_union(&self, other: &Self) -> Option<Self> {
        if self.assignments.len() != other.assignments.len() {
            return None;
        }
        let mut differing: Option<&Variable> = None;
        for ((va, sa), (vb, sb)) in self.assignments.iter().zip(other.assignments.iter()) {
            if va != vb {
                return None;
            }
            if sa != sb {
                if differing.is_some() {
                    return None;
                }
                differing = Some(va);
            }
        }
        let Some(variable) = differing else {
            return Some(self.clone());
        };
        let merged = self.assignments[variable].union_with(&other.assignments[variable]);
        let mut assignments = self.assignments.clone();
        assignments.insert(variable.clone(), merged);
        Some(Self { assignments })
    }
}

impl Hash for SimpleEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (variable, value) in &self.assignments {
            variable.hash(state);
            value.hash(state);
        }
    }
}

impl fmt::Display for SimpleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("∅");
        }
        f.write_str("{")?;
        for (i, (variable, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ∈ {}", variable.name(), value)?;
        }
        f.write_str("}")
    }
}

impl SimpleEvent {
    /// The assignment documents in variable order, without the variables.
    ///
    /// Events share one variable list across their simple events, so the
    /// per-simple payload only carries the values.
    pub(crate) fn assignments_to_json(&self) -> Value {
        let assignments: Vec<Value> = self
            .assignments
            .values()
            .map(VariableSet::to_json)
            .collect();
        Value::Array(assignments)
    }

    /// Rebuilds a simple event from an assignment array positionally
    /// matched against `variables`.
    pub(crate) fn from_json_given_variables(
        variables: &[Variable],
        assignments: &Value,
    ) -> Result<Self, JsonError> {
        let assignments = assignments
            .as_array()
            .ok_or(JsonError::MissingField("assignments"))?;
        if assignments.len() != variables.len() {
            return Err(JsonError::InvalidValue {
                field: "assignments",
                message: format!(
                    "expected {} assignments, found {}",
                    variables.len(),
                    assignments.len()
                ),
            });
        }
        let entries = variables
            .iter()
            .cloned()
            .zip(
                assignments
                    .iter()
                    .map(VariableSet::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
            );
        Self::from_entries(entries).map_err(|error| JsonError::InvalidValue {
            field: "assignments",
            message: error.to_string(),
        })
    }
}

impl JsonSerializable for SimpleEvent {
    const KIND: &'static str = "simple_event";

    fn data_to_json(&self) -> Value {
        let variables: Vec<Value> = self.assignments.keys().map(Variable::to_json).collect();
        json!({ "variables": variables, "assignments": self.assignments_to_json() })
    }

    fn data_from_json(data: &Value) -> Result<Self, JsonError> {
        let variables = data
            .get("variables")
            .and_then(Value::as_array)
            .ok_or(JsonError::MissingField("variables"))?
            .iter()
            .map(Variable::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        let assignments = data
            .get("assignments")
            .ok_or(JsonError::MissingField("assignments"))?;
        Self::from_json_given_variables(&variables, assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borel_core::algebra::CompositeSet;
    use borel_core::interval::Interval;
    use borel_core::symbolic::{Set, Universe};
    use std::sync::Arc;

    fn letters() -> Arc<Universe> {
        Arc::new(Universe::try_new(["A", "B", "C"]).expect("valid universe"))
    }

    fn letter_set(universe: &Arc<Universe>, symbols: &[&str]) -> Set {
        Set::try_from_symbols(universe, symbols.iter().copied()).expect("subset")
    }

    fn abc_variable(name: &str) -> Variable {
        Variable::symbolic(name, Set::full(&letters()))
    }

    #[test]
    fn test_constructor_and_contains() {
        let universe = letters();
        let a = Variable::symbolic("a", Set::full(&universe));
        let x = Variable::continuous("x");
        let y = Variable::continuous("y");

        let event = SimpleEvent::from_entries([
            (a, VariableSet::Set(letter_set(&universe, &["A"]))),
            (x.clone(), VariableSet::Interval(Interval::open(0.0, 1.0))),
            (y, VariableSet::Interval(Interval::open(0.0, 1.0))),
        ])
        .expect("valid event");

        assert!(!event.is_empty());
        assert_eq!(
            event.assignment(&x),
            Some(&VariableSet::Interval(Interval::open(0.0, 1.0)))
        );

        let inside = Point::new().with("a", "A").with("x", 0.5).with("y", 0.1);
        assert!(event.contains(&inside));

        let wrong_symbol = Point::new().with("a", "B").with("x", 0.5).with("y", 0.1);
        assert!(!event.contains(&wrong_symbol));

        // A point that omits a constrained variable is not contained.
        let partial = Point::new().with("x", 0.5).with("y", 0.1);
        assert!(!event.contains(&partial));
    }

    #[test]
    fn test_try_insert_errors() {
        let universe = letters();
        let a = Variable::symbolic("a", Set::full(&universe));
        let x = Variable::continuous("x");

        let mut event = SimpleEvent::new();

        // An interval assigned to a symbolic variable.
        let error = event
            .try_insert(a.clone(), Interval::open(0.0, 1.0))
            .expect_err("type mismatch");
        assert!(matches!(error, EventError::TypeMismatch { .. }));

        // A set assigned to a continuous variable.
        let error = event
            .try_insert(x.clone(), letter_set(&universe, &["A"]))
            .expect_err("type mismatch");
        assert!(matches!(error, EventError::TypeMismatch { .. }));

        // A symbolic value from a foreign universe.
        let other = Arc::new(Universe::try_new(["X", "Y"]).expect("valid universe"));
        let error = event
            .try_insert(a.clone(), Set::full(&other))
            .expect_err("universe mismatch");
        assert!(matches!(error, EventError::UniverseMismatch { .. }));

        // A value escaping a bounded domain.
        let bounded = Variable::symbolic("b", letter_set(&universe, &["A", "B"]));
        let error = event
            .try_insert(bounded.clone(), letter_set(&universe, &["A", "C"]))
            .expect_err("domain escape");
        assert!(matches!(error, EventError::DomainEscape { .. }));

        // Clipping keeps the admissible part instead.
        event
            .insert_clipped(bounded.clone(), letter_set(&universe, &["A", "C"]))
            .expect("clipped");
        assert_eq!(
            event.assignment(&bounded),
            Some(&VariableSet::Set(letter_set(&universe, &["A"])))
        );
    }

    #[test]
    fn test_intersection_aligns_variables() {
        let universe = letters();
        let a = Variable::symbolic("a", Set::full(&universe));
        let x = Variable::continuous("x");
        let y = Variable::continuous("y");

        let event_1 = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["A", "B"]).into()),
            (x.clone(), Interval::open(0.0, 1.0).into()),
            (y.clone(), Interval::open(0.0, 1.0).into()),
        ])
        .expect("valid event");

        let event_2 = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["A"]).into()),
            (x.clone(), Interval::open(0.5, 1.0).into()),
        ])
        .expect("valid event");

        let intersection = event_1.intersection_with(&event_2);
        let expected = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["A"]).into()),
            (x.clone(), Interval::open(0.5, 1.0).into()),
            (y.clone(), Interval::open(0.0, 1.0).into()),
        ])
        .expect("valid event");
        assert_eq!(intersection, expected);
        assert_ne!(intersection, event_1);

        // Disjoint symbolic parts empty the whole product.
        let event_3 = SimpleEvent::from_entries([(a, letter_set(&universe, &["C"]).into())])
            .expect("valid event");
        assert!(event_1.intersection_with(&event_3).is_empty());
    }

    #[test]
    fn test_linear_complement() {
        let universe = letters();
        let a = Variable::symbolic("a", Set::full(&universe));
        let x = Variable::continuous("x");
        let y = Variable::continuous("y");

        let event = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["A", "B"]).into()),
            (x.clone(), Interval::open(0.0, 1.0).into()),
            (y.clone(), Interval::reals().into()),
        ])
        .expect("valid event");

        let complement = event.complement();

        // One piece per variable, minus the unconstrained `y`.
        assert_eq!(complement.len(), 2);

        let piece_a = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["C"]).into()),
            (x.clone(), Interval::reals().into()),
            (y.clone(), Interval::reals().into()),
        ])
        .expect("valid event");
        let piece_x = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["A", "B"]).into()),
            (x.clone(), Interval::open(0.0, 1.0).complement().into()),
            (y.clone(), Interval::reals().into()),
        ])
        .expect("valid event");
        assert_eq!(complement[0], piece_a);
        assert_eq!(complement[1], piece_x);

        // The pieces are pairwise disjoint.
        assert!(complement[0].intersection_with(&complement[1]).is_empty());
    }

    #[test]
    fn test_complement_of_unconstrained_event_is_empty() {
        assert!(SimpleEvent::new().complement().is_empty());
    }

    #[test]
    fn test_fill_missing_and_marginal() {
        let x = Variable::continuous("x");
        let y = Variable::continuous("y");

        let event = SimpleEvent::from_entries([(x.clone(), Interval::open(0.0, 1.0).into())])
            .expect("valid event");

        let filled = event.fill_missing([y.clone()]);
        assert_eq!(filled.len(), 2);
        assert_eq!(
            filled.assignment(&y),
            Some(&VariableSet::Interval(Interval::reals()))
        );

        let projected = filled.marginal([&x]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.assignment_named("x"), event.assignment_named("x"));
    }

    #[test]
    fn test_try_union_merges_single_difference() {
        let universe = letters();
        let a = abc_variable("a");
        let x = Variable::continuous("x");

        let left = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["A", "B"]).into()),
            (x.clone(), Interval::open(0.0, 1.0).into()),
        ])
        .expect("valid event");
        let right = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["C"]).into()),
            (x.clone(), Interval::open(0.0, 1.0).into()),
        ])
        .expect("valid event");

        let merged = left.try_union(&right).expect("mergeable");
        assert_eq!(
            merged.assignment(&a),
            Some(&VariableSet::Set(Set::full(&universe)))
        );

        // Two differing variables block the merge.
        let far = SimpleEvent::from_entries([
            (a.clone(), letter_set(&universe, &["C"]).into()),
            (x.clone(), Interval::open(2.0, 3.0).into()),
        ])
        .expect("valid event");
        assert_eq!(left.try_union(&far), None);
    }

    #[test]
    fn test_total_cmp_is_deterministic() {
        let x = Variable::continuous("x");
        let narrow = SimpleEvent::from_entries([(x.clone(), Interval::open(0.0, 1.0).into())])
            .expect("valid event");
        let wide = SimpleEvent::from_entries([(x.clone(), Interval::open(0.0, 2.0).into())])
            .expect("valid event");
        assert_eq!(narrow.total_cmp(&wide), Ordering::Less);
        assert_eq!(narrow.total_cmp(&narrow), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        let x = Variable::continuous("x");
        let event = SimpleEvent::from_entries([(x, Interval::closed(0.0, 1.0).into())])
            .expect("valid event");
        assert_eq!(format!("{event}"), "{x ∈ [0, 1]}");
        assert_eq!(format!("{}", SimpleEvent::new()), "{}");
    }

    #[test]
    fn test_json_round_trip() {
        let universe = letters();
        let a = abc_variable("a");
        let x = Variable::continuous("x");
        let event = SimpleEvent::from_entries([
            (a, letter_set(&universe, &["B"]).into()),
            (x, Interval::closed(0.0, 1.0).into()),
        ])
        .expect("valid event");

        let document = event.to_json();
        assert_eq!(document["kind"], "simple_event");
        let back = SimpleEvent::from_json(&document).expect("round trip");
        assert_eq!(back, event);
    }
}
