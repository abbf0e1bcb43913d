/// Errors that can occur while coercing metadata into attribute values
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    /// The value has no attribute representation (null, object, nested or mixed array)
    #[error("Unsupported attribute value for '{name}': {kind}")]
    Unsupported {
        /// Attribute name
        name: String,
        /// Description of the offending value
        kind: String,
    },

    /// An integer does not fit the 32-bit attribute representation
    #[error("Attribute '{name}' out of 32-bit integer range: {value}")]
    OutOfRange {
        /// Attribute name
        name: String,
        /// The offending value, as written by the caller
        value: String,
    },
}
