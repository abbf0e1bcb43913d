use crate::schema::DataType;

/// Errors raised by the storage layer
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error from the Arrow library
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error serializing/deserializing the JSON header
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Invalid or malformed dataset path
    #[error("Invalid dataset path: {0}")]
    InvalidPath(String),

    /// A file already exists at the requested location
    #[error("Dataset already exists: {0}")]
    AlreadyExists(String),

    /// The file is not a valid dataset container
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Payload length does not fit the variable's dimensions
    #[error("Shape mismatch for '{variable}': {reason}")]
    ShapeMismatch {
        /// Variable name
        variable: String,
        /// What did not fit
        reason: String,
    },

    /// A value cannot be stored in the variable's element type
    #[error("Value {value} for '{variable}' cannot be stored as {dtype}")]
    ValueOutOfRange {
        /// Variable name
        variable: String,
        /// Element type of the variable
        dtype: DataType,
        /// Offending value
        value: f64,
    },

    /// A dimension with this name already exists
    #[error("Dimension already exists: {0}")]
    DuplicateDimension(String),

    /// A variable with this name already exists
    #[error("Variable already exists: {0}")]
    DuplicateVariable(String),

    /// No dimension with this name
    #[error("Dimension not found: {0}")]
    UnknownDimension(String),

    /// No variable with this name
    #[error("Variable not found: {0}")]
    UnknownVariable(String),

    /// A variable may reference at most one unlimited dimension
    #[error("Variable '{0}' references more than one unlimited dimension")]
    MultipleUnlimited(String),

    /// Mutation attempted on a store opened for reading
    #[error("Store is read-only")]
    ReadOnly,

    /// Operation attempted after the store was closed
    #[error("Store is closed")]
    Closed,
}
