//! # Attribute Coercion
//!
//! Dataset attributes can only hold a small, closed set of primitive types
//! (see [`AttrValue`]). Caller metadata on the other hand is arbitrary, so every
//! metadata entry passes through [`coerce`] before it reaches storage:
//!
//! | Input | Stored as |
//! |-------|-----------|
//! | `true` / `false` | `Int(1)` / `Int(0)` |
//! | integer | `Int` (32-bit, out-of-range values are rejected) |
//! | float | `Float` |
//! | string | `Text` |
//! | array of integers | `Ints` |
//! | array of numbers | `Floats` |
//!
//! Anything else (null, objects, nested or mixed arrays) is rejected with
//! [`AttributeError::Unsupported`]; composite values are never serialized.

mod error;
mod value;


pub use error::AttributeError;
pub use value::AttrValue;

use serde_json::{Number, Value};

/// Coerce an arbitrary metadata value into an attribute value
///
/// `name` is only used for error reporting.
pub fn coerce(name: &str, value: &Value) -> Result<AttrValue, AttributeError> {
    match value {
        Value::Bool(b) => Ok(AttrValue::Int(i32::from(*b))),
        Value::Number(n) => coerce_number(name, n),
        Value::String(s) => Ok(AttrValue::Text(s.clone())),
        Value::Array(items) => coerce_array(name, items),
        Value::Null => Err(unsupported(name, "null")),
        Value::Object(_) => Err(unsupported(name, "object")),
    }
}

fn coerce_number(name: &str, n: &Number) -> Result<AttrValue, AttributeError> {
    if n.is_i64() || n.is_u64() {
        return integer_to_i32(name, n).map(AttrValue::Int);
    }
    n.as_f64()
        .map(AttrValue::Float)
        .ok_or_else(|| unsupported(name, "non-finite number"))
}

fn integer_to_i32(name: &str, n: &Number) -> Result<i32, AttributeError> {
    n.as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| AttributeError::OutOfRange {
            name: name.to_string(),
            value: n.to_string(),
        })
}

fn coerce_array(name: &str, items: &[Value]) -> Result<AttrValue, AttributeError> {
    if items.is_empty() {
        return Err(unsupported(name, "empty array"));
    }

    let all_integral = items.iter().all(|item| match item {
        Value::Bool(_) => true,
        Value::Number(n) => n.is_i64() || n.is_u64(),
        _ => false,
    });

    if all_integral {
        let ints = items
            .iter()
            .map(|item| match item {
                Value::Bool(b) => Ok(i32::from(*b)),
                Value::Number(n) => integer_to_i32(name, n),
                _ => Err(unsupported(name, "mixed array")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(AttrValue::Ints(ints));
    }

    items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_f64().ok_or_else(|| unsupported(name, "non-finite number")),
            Value::Array(_) | Value::Object(_) => Err(unsupported(name, "nested array")),
            _ => Err(unsupported(name, "mixed array")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AttrValue::Floats)
}

fn unsupported(name: &str, kind: &str) -> AttributeError {
    AttributeError::Unsupported {
        name: name.to_string(),
        kind: kind.to_string(),
    }
}
