/// Errors that can occur while loading global metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error reading a metadata file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}
