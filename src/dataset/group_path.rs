use std::fmt;
use std::str::FromStr;

use crate::schema::{GROUP_SEPARATOR, TIME_VARIABLE};

use super::DatasetError;

/// A validated `/`-separated variable name
///
/// Groups are encoded in the name itself; all variables share one flat
/// namespace. `glider_flight/mass` is the variable `mass` in group
/// `glider_flight`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupPath(String);

impl GroupPath {
    /// Validate a variable name
    pub fn parse(name: &str) -> Result<Self, DatasetError> {
        let invalid = |reason: &str| DatasetError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("empty name"));
        }
        if name.starts_with(GROUP_SEPARATOR) || name.ends_with(GROUP_SEPARATOR) {
            return Err(invalid("leading or trailing separator"));
        }
        if name.split(GROUP_SEPARATOR).any(str::is_empty) {
            return Err(invalid("empty group segment"));
        }
        Ok(Self(name.to_string()))
    }

    /// The full name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, outermost group first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(GROUP_SEPARATOR)
    }

    /// Last segment
    pub fn leaf(&self) -> &str {
        self.0
            .rsplit_once(GROUP_SEPARATOR)
            .map_or(self.0.as_str(), |(_, leaf)| leaf)
    }

    /// Enclosing group, `None` at top level
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once(GROUP_SEPARATOR).map(|(parent, _)| parent)
    }

    /// Name of the time coordinate belonging to this path's group
    ///
    /// `glider_flight/mass` maps to `glider_flight/time`, `latitude` to `time`.
    pub fn time_companion(&self) -> String {
        match self.parent() {
            Some(parent) => format!("{}{}{}", parent, GROUP_SEPARATOR, TIME_VARIABLE),
            None => TIME_VARIABLE.to_string(),
        }
    }
}

impl FromStr for GroupPath {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for GroupPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
