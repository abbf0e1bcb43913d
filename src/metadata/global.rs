use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MetadataError;

/// Placeholder for descriptive fields that have not been filled in yet
pub const PLACEHOLDER: &str = "tbd";

/// Descriptive global metadata of a dataset
///
/// The four named fields always become global attributes. Every other key
/// lands in `extra` and passes through attribute coercion when the dataset is
/// created, so booleans become 32-bit integers and composite values are
/// rejected.
///
/// A metadata file is plain TOML:
///
/// ```toml
/// title = "Glider mission 2021-05"
/// source = "glider_flight_model"
/// originator = "Coastal Observing Group"
/// contact = "data@example.org"
/// depth_rating = true
/// num_sensors = 4
/// offset = 1.5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetadata {
    /// `title` attribute
    #[serde(default)]
    pub title: String,

    /// `source` attribute
    #[serde(default)]
    pub source: String,

    /// `originator` attribute
    #[serde(default)]
    pub originator: String,

    /// `contact` attribute
    #[serde(default)]
    pub contact: String,

    /// Additional global attributes, in key order
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GlobalMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefilled configuration with placeholder values for every named field
    pub fn template() -> Self {
        Self {
            title: PLACEHOLDER.to_string(),
            source: PLACEHOLDER.to_string(),
            originator: PLACEHOLDER.to_string(),
            contact: PLACEHOLDER.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Load metadata from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse metadata from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, MetadataError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the originator
    pub fn with_originator(mut self, originator: impl Into<String>) -> Self {
        self.originator = originator.into();
        self
    }

    /// Set the contact
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    /// Add (or replace) an extra global attribute
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
