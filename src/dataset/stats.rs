use std::fmt;

/// Statistics from a closed dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStats {
    /// Number of dimensions in the dataset
    pub dimensions: usize,

    /// Number of variables, coordinates included
    pub variables: usize,

    /// Number of values across all variable payloads
    pub values_written: usize,

    /// Bytes persisted by the storage backend
    pub total_size_bytes: u64,
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset: {} dimensions, {} variables, {} values, {} bytes",
            self.dimensions, self.variables, self.values_written, self.total_size_bytes
        )
    }
}
