//! # Container Schema
//!
//! Format constants and the serializable header of a dataset container.
//!
//! ## Container Layout
//!
//! ```text
//! {name}.cfz (ZIP archive)
//! ├── mimetype                 # "application/vnd.cfdataset+zip" (uncompressed, first entry)
//! ├── header.json              # Dimensions, attributes, variable descriptors (Deflate compressed)
//! └── variables/0000.parquet   # One payload per variable (uncompressed entry)
//! ```
//!
//! Every payload is a single-column Parquet file (`values`) holding the
//! variable's data in row-major order. The header records each variable's
//! dimensions and shape, so a reader can restore the array layout.

mod constants;
/// Serializable header types.
pub mod header;


pub use constants::*;
pub use header::{DataType, DimensionInfo, DimensionLength, Header, VariableHeader, VariableInfo};
