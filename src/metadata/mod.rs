//! # Global Metadata
//!
//! Descriptive metadata written to every dataset opened in write mode. It can
//! be built in code, starting from [`GlobalMetadata::template`], or loaded
//! from a TOML file with [`GlobalMetadata::from_toml_file`].

mod error;
mod global;


pub use error::MetadataError;
pub use global::{GlobalMetadata, PLACEHOLDER};
