use crate::attributes::AttributeError;
use crate::storage::StorageError;

/// Errors that can occur during dataset operations
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Error from the storage backend
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Metadata value that cannot be stored as an attribute
    #[error("Attribute error: {0}")]
    Attribute(#[from] AttributeError),

    /// A parameter was given neither (time, values) nor (time, depth, values)
    #[error("Variable type not supported for '{name}': expected 2 or 3 series, got {given}")]
    Arity {
        /// Parameter name
        name: String,
        /// Number of series supplied
        given: usize,
    },

    /// The values series does not match the length implied by its axes
    #[error("Length mismatch for '{name}': expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Parameter name
        name: String,
        /// Length implied by the axis series
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// A depth series does not match the depth axis already in the dataset
    #[error("Depth axis mismatch for '{name}': axis has length {expected}, got {actual}")]
    DepthMismatch {
        /// Parameter name
        name: String,
        /// Length of the existing depth axis
        expected: usize,
        /// Length of the supplied depth series
        actual: usize,
    },

    /// Malformed group path
    #[error("Invalid variable name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },
}
