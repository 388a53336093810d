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

//! # JSON Codec
//!
//! Every set value in this workspace serializes to a document of the shape
//! `{"kind": <type tag>, "data": <payload>}` and deserializes from the same
//! shape, so external adapters can round-trip values without knowing the
//! concrete type up front. The [`JsonSerializable`] trait supplies the
//! envelope; implementors only describe their payload.
//!
//! Interval endpoints may be `±∞`, which strict JSON cannot represent as
//! numbers; they encode as the strings `"-inf"` and `"inf"`.

use serde_json::{json, Number, Value};
use std::fmt;

/// Errors produced while decoding a JSON document into a set value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// A required field was absent or had the wrong JSON type.
    MissingField(&'static str),
    /// The document's `kind` tag names a different type.
    KindMismatch {
        /// The tag the decoder expected.
        expected: &'static str,
        /// The tag found in the document.
        found: String,
    },
    /// A field was present but its value violates the type's invariants.
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// What went wrong.
        message: String,
    },
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing or malformed field '{field}'"),
            Self::KindMismatch { expected, found } => {
                write!(f, "Expected kind '{expected}' but found '{found}'")
            }
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for field '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for JsonError {}

/// A value that serializes as a `{"kind", "data"}` document.
///
/// `from_json(v.to_json()) == v` holds for every canonical value.
pub trait JsonSerializable: Sized {
    /// The type tag written into the `kind` field.
    const KIND: &'static str;

    /// The payload written into the `data` field.
    fn data_to_json(&self) -> Value;

    /// Reconstructs a value from the payload of the `data` field.
    fn data_from_json(data: &Value) -> Result<Self, JsonError>;

    /// Serializes this value with its envelope.
    fn to_json(&self) -> Value {
        json!({ "kind": Self::KIND, "data": self.data_to_json() })
    }

    /// Deserializes a value, verifying the `kind` tag first.
    fn from_json(value: &Value) -> Result<Self, JsonError> {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(JsonError::MissingField("kind"))?;
        if kind != Self::KIND {
            return Err(JsonError::KindMismatch {
                expected: Self::KIND,
                found: kind.to_string(),
            });
        }
        let data = value.get("data").ok_or(JsonError::MissingField("data"))?;
        Self::data_from_json(data)
    }
}

/// Encodes an interval endpoint, mapping `±∞` onto the strings strict JSON
/// requires.
pub(crate) fn endpoint_to_json(value: f64) -> Value {
    if value == f64::INFINITY {
        Value::String("inf".to_string())
    } else if value == f64::NEG_INFINITY {
        Value::String("-inf".to_string())
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// Decodes an interval endpoint written by [`endpoint_to_json`].
pub(crate) fn endpoint_from_json(value: Option<&Value>, field: &'static str) -> Result<f64, JsonError> {
    match value {
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or(JsonError::InvalidValue {
                field,
                message: "endpoint is not representable as f64".to_string(),
            }),
        Some(Value::String(name)) if name == "inf" => Ok(f64::INFINITY),
        Some(Value::String(name)) if name == "-inf" => Ok(f64::NEG_INFINITY),
        _ => Err(JsonError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encoding() {
        assert_eq!(endpoint_to_json(1.5), json!(1.5));
        assert_eq!(endpoint_to_json(f64::INFINITY), json!("inf"));
        assert_eq!(endpoint_to_json(f64::NEG_INFINITY), json!("-inf"));
    }

    #[test]
    fn test_endpoint_decoding() {
        assert_eq!(endpoint_from_json(Some(&json!(2.0)), "lower"), Ok(2.0));
        assert_eq!(
            endpoint_from_json(Some(&json!("inf")), "upper"),
            Ok(f64::INFINITY)
        );
        assert_eq!(
            endpoint_from_json(Some(&json!("-inf")), "lower"),
            Ok(f64::NEG_INFINITY)
        );
        assert_eq!(
            endpoint_from_json(None, "lower"),
            Err(JsonError::MissingField("lower"))
        );
        assert_eq!(
            endpoint_from_json(Some(&json!("wide")), "upper"),
            Err(JsonError::MissingField("upper"))
        );
    }

    #[test]
    fn test_error_display() {
        let error = JsonError::KindMismatch {
            expected: "interval",
            found: "set".to_string(),
        };
        assert_eq!(format!("{error}"), "Expected kind 'interval' but found 'set'");
    }
}
