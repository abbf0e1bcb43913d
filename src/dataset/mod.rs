//! # Dataset Module
//!
//! [`DatasetWriter`] builds a self-describing array dataset out of time series,
//! time-by-depth profiles and scalar "meta" variables, and keeps the file's
//! dimension and convention bookkeeping out of the caller's hands.
//!
//! ## Axes
//!
//! | Dimension | Length | Coordinate | Created by |
//! |-----------|--------|------------|------------|
//! | `T` (or any caller-chosen name) | unlimited | group's `time` | first series on that dimension |
//! | `Z` | length of the first depth series | `z` | first depth profile |
//!
//! Each dimension is created at most once per dataset; the first series
//! decides its coordinate values.
//!
//! ## Group Paths
//!
//! Variable names may contain `/`-separated groups (`glider_flight/mass`).
//! All variables live in one flat namespace. The time coordinate created for a
//! grouped series is named after its group (`glider_flight/time`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cfdataset::dataset::{DatasetWriter, ParameterOptions};
//! use cfdataset::metadata::GlobalMetadata;
//!
//! let metadata = GlobalMetadata::template().with_title("example");
//! let mut dataset = DatasetWriter::create("example.cfz", &metadata)?;
//!
//! let t: Vec<f64> = (0..100).map(f64::from).collect();
//! let lat: Vec<f64> = (0..100).map(|i| 54.0 + f64::from(i) / 99.0).collect();
//! dataset.add_time_series("latitude", "degree north", &t, &lat, ParameterOptions::default())?;
//!
//! let stats = dataset.close()?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod group_path;
mod registry;
mod stats;
mod types;
mod writer_impl;


pub use error::DatasetError;
pub use group_path::GroupPath;
pub use registry::{Dimension, DimensionRegistry};
pub use stats::DatasetStats;
pub use types::{OpenMode, ParameterOptions};
pub use writer_impl::DatasetWriter;
