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

use crate::variable::VariableKind;
use std::fmt;

/// The error type for event construction.
///
/// Operations on constructed events are total; everything that can go
/// wrong is caught when a value is assigned to a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The assigned value's algebra does not match the variable's kind,
    /// e.g. an interval assigned to a symbolic variable.
    TypeMismatch {
        /// The name of the variable.
        variable: String,
        /// The kind of the variable.
        expected: VariableKind,
        /// The algebra of the assigned value (`"interval"` or `"set"`).
        found: &'static str,
    },
    /// The assigned value is not fully contained in the variable's domain.
    DomainEscape {
        /// The name of the variable.
        variable: String,
    },
    /// The assigned symbolic value draws from a different universe than
    /// the variable's domain.
    UniverseMismatch {
        /// The name of the variable.
        variable: String,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                variable,
                expected,
                found,
            } => write!(
                f,
                "Variable '{variable}' is {expected} but was assigned a value of type '{found}'"
            ),
            Self::DomainEscape { variable } => write!(
                f,
                "Assigned value escapes the domain of variable '{variable}'"
            ),
            Self::UniverseMismatch { variable } => write!(
                f,
                "Assigned value draws from a different universe than variable '{variable}'"
            ),
        }
    }
}

impl std::error::Error for EventError {}
