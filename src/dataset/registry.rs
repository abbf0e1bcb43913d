use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::attributes::AttrValue;
use crate::schema::{DataType, DimensionLength};
use crate::storage::{AttributeTarget, Storage, StorageError};

/// A dimension known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    name: String,
    length: DimensionLength,
    coordinate: String,
}

impl Dimension {
    /// Dimension name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared length
    pub fn length(&self) -> DimensionLength {
        self.length
    }

    /// Name of the coordinate variable created alongside the dimension
    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }
}

/// Coordinate variable materialized the first time a dimension is requested
#[derive(Debug, Clone)]
pub(crate) struct Coordinate<'a> {
    pub variable: &'a str,
    pub values: &'a [f64],
    pub attributes: Vec<(&'static str, AttrValue)>,
}

/// Per-dataset record of the dimensions created so far
///
/// The first request for a name creates the dimension together with its
/// coordinate variable; every later request returns the existing entry and
/// leaves storage untouched, whatever length or values it carries.
#[derive(Debug, Default)]
pub struct DimensionRegistry {
    dimensions: BTreeMap<String, Dimension>,
}

impl DimensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a dimension
    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.get(name)
    }

    /// Returns true when the dimension has been created
    pub fn contains(&self, name: &str) -> bool {
        self.dimensions.contains_key(name)
    }

    /// Number of dimensions created
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Returns true when no dimension has been created
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Iterate over dimensions in name order
    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.values()
    }

    /// Find or create an unlimited dimension
    pub(crate) fn ensure_unbounded<S: Storage>(
        &mut self,
        storage: &mut S,
        name: &str,
        coordinate: Coordinate<'_>,
    ) -> Result<&Dimension, StorageError> {
        self.ensure(storage, name, DimensionLength::Unlimited, coordinate)
    }

    /// Find or create a fixed-length dimension
    ///
    /// An existing dimension is returned as is, even if `length` differs.
    pub(crate) fn ensure_fixed<S: Storage>(
        &mut self,
        storage: &mut S,
        name: &str,
        length: usize,
        coordinate: Coordinate<'_>,
    ) -> Result<&Dimension, StorageError> {
        self.ensure(storage, name, DimensionLength::Fixed(length), coordinate)
    }

    fn ensure<S: Storage>(
        &mut self,
        storage: &mut S,
        name: &str,
        length: DimensionLength,
        coordinate: Coordinate<'_>,
    ) -> Result<&Dimension, StorageError> {
        match self.dimensions.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                // Coordinate name must be free before the dimension exists
                if storage.variable(coordinate.variable)?.is_some() {
                    return Err(StorageError::DuplicateVariable(
                        coordinate.variable.to_string(),
                    ));
                }
                storage.create_dimension(name, length)?;
                storage.create_variable(coordinate.variable, DataType::Float64, &[name])?;
                for (attr, value) in coordinate.attributes {
                    storage.put_attribute(
                        AttributeTarget::Variable(coordinate.variable),
                        attr,
                        value,
                    )?;
                }
                storage.put_values(coordinate.variable, coordinate.values)?;

                log::debug!(
                    "Created dimension {} ({:?}) with coordinate {}",
                    name,
                    length,
                    coordinate.variable
                );

                Ok(&*entry.insert(Dimension {
                    name: name.to_string(),
                    length,
                    coordinate: coordinate.variable.to_string(),
                }))
            }
        }
    }
}
