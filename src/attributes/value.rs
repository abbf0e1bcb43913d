use std::fmt;

use serde::{Deserialize, Serialize};

/// A value that a dataset attribute can hold
///
/// The container stores attributes with an explicit type tag, so an integer
/// attribute stays an integer across a write/read cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttrValue {
    /// UTF-8 text
    Text(String),
    /// Signed 32-bit integer
    Int(i32),
    /// Double precision float
    Float(f64),
    /// Array of signed 32-bit integers
    Ints(Vec<i32>),
    /// Array of double precision floats
    Floats(Vec<f64>),
}

impl AttrValue {
    /// Returns the text value, if this is a text attribute
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer attribute
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float value, if this is a float attribute
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the stored type
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "text",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Ints(_) => "ints",
            AttrValue::Floats(_) => "floats",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{:?}", s),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Ints(v) => write!(f, "{:?}", v),
            AttrValue::Floats(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}
