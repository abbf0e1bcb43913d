//! # Storage Layer
//!
//! The dataset engine drives its file through the [`Storage`] trait, which
//! exposes only the primitives the engine needs: create a dimension, create a
//! variable of a given type over given dimensions, assign attributes, assign and
//! read payloads, and close.
//!
//! Two backends are provided:
//!
//! - [`ContainerStore`]: single-file `.cfz` ZIP container with a JSON header and
//!   one Parquet payload per variable
//! - [`MemoryStore`]: in-memory tables with identical semantics
//!
//! ## Shape Rule
//!
//! A payload for a variable over `d1..dn` must hold `product(fixed lengths) * k`
//! values. `k` is free only when one of the dimensions is unlimited (that
//! dimension grows to at least `k`); otherwise `k = 1`. Scalars take exactly one
//! value.

mod config;
mod container;
mod error;
mod memory;
mod payload;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

pub use config::{CompressionType, StoreConfig};
pub use container::ContainerStore;
pub use error::StorageError;
pub use memory::MemoryStore;

pub use crate::schema::{DataType, DimensionInfo, DimensionLength, VariableInfo};

use crate::attributes::AttrValue;

/// Owner of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget<'a> {
    /// Global (dataset-level) attribute
    Global,
    /// Attribute of the named variable
    Variable(&'a str),
}

/// Primitive operations of a self-describing array file
///
/// Implementations own their file handle. After [`Storage::close`] every
/// operation fails with [`StorageError::Closed`].
pub trait Storage {
    /// Returns true when mutations are allowed
    fn is_writable(&self) -> bool;

    /// Returns true once the store has been closed
    fn is_closed(&self) -> bool;

    /// Create a named dimension
    fn create_dimension(&mut self, name: &str, length: DimensionLength)
        -> Result<(), StorageError>;

    /// Create a named variable of the given type over the given dimensions
    fn create_variable(
        &mut self,
        name: &str,
        dtype: DataType,
        dimensions: &[&str],
    ) -> Result<(), StorageError>;

    /// Assign (or replace) an attribute
    fn put_attribute(
        &mut self,
        target: AttributeTarget<'_>,
        name: &str,
        value: AttrValue,
    ) -> Result<(), StorageError>;

    /// Assign a variable's payload (row-major)
    fn put_values(&mut self, variable: &str, values: &[f64]) -> Result<(), StorageError>;

    /// Read a variable's payload (row-major). Unwritten variables read as empty.
    fn values(&self, variable: &str) -> Result<Vec<f64>, StorageError>;

    /// Read a single attribute
    fn attribute(
        &self,
        target: AttributeTarget<'_>,
        name: &str,
    ) -> Result<Option<AttrValue>, StorageError>;

    /// Read all attributes of a target
    fn attributes(
        &self,
        target: AttributeTarget<'_>,
    ) -> Result<BTreeMap<String, AttrValue>, StorageError>;

    /// Look up a dimension
    fn dimension(&self, name: &str) -> Result<Option<DimensionInfo>, StorageError>;

    /// All dimensions in creation order
    fn dimensions(&self) -> Result<Vec<DimensionInfo>, StorageError>;

    /// Look up a variable descriptor
    fn variable(&self, name: &str) -> Result<Option<VariableInfo>, StorageError>;

    /// All variable names in creation order
    fn variable_names(&self) -> Result<Vec<String>, StorageError>;

    /// Flush and release the underlying resource, returning the bytes persisted
    fn close(&mut self) -> Result<u64, StorageError>;
}
