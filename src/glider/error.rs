use crate::dataset::DatasetError;

/// Errors that can occur while serializing glider results
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    /// Error from the dataset writer
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// A parameter has no unit in the flight model
    #[error("No unit for parameter '{0}'")]
    MissingUnit(String),

    /// A scalar parameter has no value in the flight model
    #[error("No value for parameter '{0}'")]
    MissingValue(String),

    /// Calibration series were given without the shared `t` vector
    #[error("Calibration result has series but no time vector 't'")]
    MissingTime,
}
