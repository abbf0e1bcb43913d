//! Serializable description of a dataset container (`header.json`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::AttrValue;

use super::constants::CFDATASET_FORMAT_VERSION;

/// Length of a dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionLength {
    /// Growable axis; its current length follows the longest payload written along it
    Unlimited,
    /// Axis with a length fixed at creation
    Fixed(usize),
}

impl DimensionLength {
    /// Returns true for growable axes
    pub fn is_unlimited(&self) -> bool {
        matches!(self, DimensionLength::Unlimited)
    }
}

/// Element type of a variable payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    /// 32-bit float (`f4`)
    #[default]
    #[serde(rename = "f4")]
    Float32,
    /// 64-bit float (`f8`)
    #[serde(rename = "f8")]
    Float64,
    /// 32-bit signed integer (`i4`)
    #[serde(rename = "i4")]
    Int32,
}

impl DataType {
    /// Short type code (`f4`, `f8`, `i4`)
    pub fn code(&self) -> &'static str {
        match self {
            DataType::Float32 => "f4",
            DataType::Float64 => "f8",
            DataType::Int32 => "i4",
        }
    }

    /// Convert a value to what this type can represent
    ///
    /// Integers truncate toward zero. Returns `None` for NaN, infinities and
    /// values outside the `i32` range when the type is `Int32`.
    pub fn cast(&self, value: f64) -> Option<f64> {
        match self {
            DataType::Float32 => Some(value as f32 as f64),
            DataType::Float64 => Some(value),
            DataType::Int32 => {
                let truncated = value.trunc();
                let in_range = truncated >= i32::MIN as f64 && truncated <= i32::MAX as f64;
                (value.is_finite() && in_range).then_some(truncated)
            }
        }
    }

    /// Returns true for floating-point types
    pub fn is_float(&self) -> bool {
        !matches!(self, DataType::Int32)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f4" | "float32" => Ok(DataType::Float32),
            "f8" | "float64" => Ok(DataType::Float64),
            "i4" | "int32" => Ok(DataType::Int32),
            other => Err(format!("Unknown data type: {}", other)),
        }
    }
}

/// A dimension as recorded in the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionInfo {
    /// Dimension name
    pub name: String,
    /// Declared length
    pub length: DimensionLength,
    /// Current length (equal to the fixed length for fixed axes)
    pub current_length: usize,
}

/// A variable as recorded in the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    /// Full variable name, including any group path
    pub name: String,
    /// Element type
    pub dtype: DataType,
    /// Dimension names, outermost first
    pub dimensions: Vec<String>,
    /// Shape of the last payload written (empty until written, and for scalars)
    #[serde(default)]
    pub shape: Vec<usize>,
    /// Variable attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl VariableInfo {
    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of elements implied by `shape`
    pub fn len(&self) -> usize {
        if self.shape.is_empty() && !self.dimensions.is_empty() {
            return 0;
        }
        self.shape.iter().product()
    }

    /// Returns true when the shape holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Variable descriptor plus the ZIP entry holding its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableHeader {
    /// Descriptor
    #[serde(flatten)]
    pub info: VariableInfo,
    /// ZIP entry of the payload (absent when nothing was written)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

/// Contents of `header.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Container format version
    pub format_version: String,
    /// Dimensions in creation order
    pub dimensions: Vec<DimensionInfo>,
    /// Global attributes
    pub attributes: BTreeMap<String, AttrValue>,
    /// Variables in creation order
    pub variables: Vec<VariableHeader>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            format_version: CFDATASET_FORMAT_VERSION.to_string(),
            dimensions: Vec::new(),
            attributes: BTreeMap::new(),
            variables: Vec::new(),
        }
    }
}

impl Header {
    /// Look up a dimension by name
    pub fn dimension(&self, name: &str) -> Option<&DimensionInfo> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&VariableHeader> {
        self.variables.iter().find(|v| v.info.name == name)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
