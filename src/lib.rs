//! # cfdataset - Convention-Compliant Array Datasets
//!
//! `cfdataset` writes and reads self-describing scientific array datasets for
//! oceanographic time series and depth profiles, following the CF-1.8
//! metadata conventions.
//!
//! ## Key Features
//!
//! - **Lazy Axes**: Time and depth dimensions, together with their coordinate
//!   variables, are created the first time a series needs them and shared by
//!   every later series.
//!
//! - **Type-Safe Metadata**: Arbitrary caller metadata is coerced into the
//!   attribute types the format supports (text, 32-bit integers, floats and
//!   their arrays) before the file is created.
//!
//! - **Group Paths**: Variables can be organised as `group/name` inside one
//!   flat namespace; grouped series get a group-local time coordinate.
//!
//! - **Single-File Container**: A `.cfz` ZIP archive with a JSON header and one
//!   Parquet payload per variable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cfdataset::prelude::*;
//!
//! let metadata = GlobalMetadata::template()
//!     .with_title("example")
//!     .with_extra("description", "Example description");
//! let mut dataset = DatasetWriter::create("example.cfz", &metadata)?;
//!
//! let t: Vec<f64> = (0..100).map(f64::from).collect();
//! let lat: Vec<f64> = (0..100).map(|i| 54.0 + f64::from(i) / 99.0).collect();
//! dataset.add_time_series("latitude", "degree north", &t, &lat, ParameterOptions::default())?;
//! dataset.add_meta_variable("glider_flight/mass", "kg", 60.5, DataType::default())?;
//!
//! let stats = dataset.close()?;
//! println!("{}", stats);
//!
//! let reader = DatasetWriter::open_read("example.cfz")?;
//! let series = reader.get("latitude", &[])?;
//! assert_eq!(series[1], lat);
//! # Ok::<(), cfdataset::dataset::DatasetError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`attributes`]: attribute values and metadata coercion
//! - [`dataset`]: the dataset writer, dimension registry and group paths
//! - [`glider`]: serialization of glider flight-model results
//! - [`metadata`]: global descriptive metadata and TOML loading
//! - [`schema`]: container layout, convention constants and header types
//! - [`storage`]: storage trait with in-memory and container backends

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod attributes;
pub mod dataset;
pub mod glider;
pub mod metadata;
pub mod schema;
pub mod storage;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::attributes::{coerce, AttrValue, AttributeError};
    pub use crate::dataset::{
        DatasetError, DatasetStats, DatasetWriter, GroupPath, OpenMode, ParameterOptions,
    };
    pub use crate::glider::{
        CalibrationResult, FlightModel, GliderFlightSerializer, ModelResult, SerializerError,
        ThermalLagCoefficients,
    };
    pub use crate::metadata::{GlobalMetadata, MetadataError};
    pub use crate::schema::{DataType, DimensionLength, CFDATASET_EXTENSION, CONVENTIONS};
    pub use crate::storage::{
        CompressionType, ContainerStore, MemoryStore, Storage, StorageError, StoreConfig,
    };
}
