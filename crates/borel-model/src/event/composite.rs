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

use crate::event::simple::SimpleEvent;
use crate::point::Point;
use crate::variable::Variable;
use borel_core::algebra::{canonical_simple_sets, CompositeSet, SimpleSet};
use borel_core::json::{JsonError, JsonSerializable};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, Not, Sub};

/// A random event: a sorted, disjoint union of [`SimpleEvent`]s over a
/// shared variable set.
///
/// Construction canonicalizes: every simple event is aligned to the union
/// of all involved variables (missing variables bound to their domain),
/// empties are dropped, the rest is made disjoint, simplified, and sorted.
/// Two events describing the same subset of the product space therefore
/// compare equal and hash equally.
///
/// # Examples
///
/// ```rust
/// use borel_core::algebra::CompositeSet;
/// use borel_core::interval::Interval;
/// use borel_model::event::{Event, SimpleEvent};
/// use borel_model::variable::Variable;
///
/// let x = Variable::continuous("x");
/// let y = Variable::continuous("y");
/// let square = SimpleEvent::from_entries([
///     (x, Interval::closed(0.0, 1.0).into()),
///     (y, Interval::closed(0.0, 1.0).into()),
/// ])
/// .unwrap();
///
/// // The complement of the unit square has two simple events, not three.
/// let outside = Event::new([square]).complement();
/// assert_eq!(outside.simple_sets().len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Event {
    simple_sets: Vec<SimpleEvent>,
}

impl Event {
    /// Creates an event from any collection of simple events.
    ///
    /// The inputs may overlap, duplicate each other, mention different
    /// variables, or be empty; the result is canonical.
    pub fn new(simple_events: impl IntoIterator<Item = SimpleEvent>) -> Self {
        let raw: Vec<SimpleEvent> = simple_events.into_iter().collect();

        let mut variables: BTreeSet<Variable> = BTreeSet::new();
        for simple in &raw {
            variables.extend(simple.variables().cloned());
        }

        let aligned: Vec<SimpleEvent> = raw
            .into_iter()
            .map(|simple| simple.fill_missing(variables.iter().cloned()))
            .collect();

        Self {
            simple_sets: canonical_simple_sets(aligned),
        }
    }

    /// The impossible event.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            simple_sets: Vec::new(),
        }
    }

    /// The variables this event constrains, in name order.
    pub fn variables(&self) -> Vec<Variable> {
        // All simple events are aligned, so the first one carries the full
        // variable set.
        self.simple_sets
            .first()
            .map(|simple| simple.variables().cloned().collect())
            .unwrap_or_default()
    }

    /// The index of the first simple event containing `point`, if any.
    ///
    /// Simple events are disjoint, so at most one can contain the point;
    /// consumers use the index to dispatch.
    pub fn find_containing(&self, point: &Point) -> Option<usize> {
        self.simple_sets
            .iter()
            .position(|simple| simple.contains(point))
    }

    /// The smallest simple event containing this event: the variable-wise
    /// union over all simple events.
    pub fn bounding_box(&self) -> SimpleEvent {
        let mut assignments = BTreeMap::new();
        for simple in &self.simple_sets {
            for (variable, value) in simple.assignments() {
                assignments
                    .entry(variable.clone())
                    .and_modify(|union: &mut crate::variable::VariableSet| {
                        *union = union.union_with(value);
                    })
                    .or_insert_with(|| value.clone());
            }
        }
        SimpleEvent::from_validated(assignments)
    }

    /// The projection onto `variables`: each simple event keeps only the
    /// listed variables, and the projections are re-canonicalized.
    pub fn marginal<'a>(
        &self,
        variables: impl IntoIterator<Item = &'a Variable> + Clone,
    ) -> Self {
        Self::new(
            self.simple_sets
                .iter()
                .map(|simple| simple.marginal(variables.clone())),
        )
    }
}

impl CompositeSet for Event {
    type Simple = SimpleEvent;

    fn simple_sets(&self) -> &[SimpleEvent] {
        &self.simple_sets
    }

    fn with_simple_sets(&self, simple_sets: Vec<SimpleEvent>) -> Self {
        Self::new(simple_sets)
    }

    /// The ambient space is the unconstrained simple event: the full
    /// product of every variable's domain.
    fn ambient_simple_sets(&self) -> Vec<SimpleEvent> {
        vec![SimpleEvent::new()]
    }
}

impl SimpleEvent {
    /// Wraps this simple event in a composite [`Event`].
    pub fn as_composite_set(&self) -> Event {
        Event::new([self.clone()])
    }
}

impl From<SimpleEvent> for Event {
    fn from(simple: SimpleEvent) -> Self {
        simple.as_composite_set()
    }
}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.simple_sets.hash(state);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simple_sets.is_empty() {
            return f.write_str("∅");
        }
        for (i, simple) in self.simple_sets.iter().enumerate() {
            if i > 0 {
                f.write_str(" u ")?;
            }
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}

impl BitOr for &Event {
    type Output = Event;

    #[inline]
    fn bitor(self, rhs: Self) -> Event {
        self.union_with(rhs)
    }
}

impl BitAnd for &Event {
    type Output = Event;

    #[inline]
    fn bitand(self, rhs: Self) -> Event {
        self.intersection_with(rhs)
    }
}

impl Sub for &Event {
    type Output = Event;

    #[inline]
    fn sub(self, rhs: Self) -> Event {
        self.difference_with(rhs)
    }
}

impl Not for &Event {
    type Output = Event;

    #[inline]
    fn not(self) -> Event {
        self.complement()
    }
}

impl JsonSerializable for Event {
    const KIND: &'static str = "event";

    fn data_to_json(&self) -> Value {
        let variables: Vec<Value> = self
            .variables()
            .iter()
            .map(Variable::to_json)
            .collect();
        let simple_sets: Vec<Value> = self
            .simple_sets
            .iter()
            .map(SimpleEvent::assignments_to_json)
            .collect();
        json!({ "variables": variables, "simple_sets": simple_sets })
    }

    fn data_from_json(data: &Value) -> Result<Self, JsonError> {
        let variables = data
            .get("variables")
            .and_then(Value::as_array)
            .ok_or(JsonError::MissingField("variables"))?
            .iter()
            .map(Variable::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        let simple_sets = data
            .get("simple_sets")
            .and_then(Value::as_array)
            .ok_or(JsonError::MissingField("simple_sets"))?
            .iter()
            .map(|assignments| SimpleEvent::from_json_given_variables(&variables, assignments))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(simple_sets))
    }
}
