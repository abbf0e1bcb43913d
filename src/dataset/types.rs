use crate::schema::TIME_DIMENSION;

/// Access mode of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Create a new dataset and write its global metadata
    #[default]
    Write,
    /// Open an existing dataset; metadata is not rewritten and mutations fail
    Read,
}

/// Optional settings of [`super::DatasetWriter::add_parameter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterOptions {
    /// `standard_name` attribute; omitted when `None`
    pub standard_name: Option<String>,

    /// Time dimension to attach the series to; `T` when `None`
    pub time_dimension: Option<String>,
}

impl ParameterOptions {
    /// Options with no standard name on the default time dimension
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the standard name
    pub fn with_standard_name(mut self, standard_name: impl Into<String>) -> Self {
        self.standard_name = Some(standard_name.into());
        self
    }

    /// Set the time dimension
    pub fn with_time_dimension(mut self, time_dimension: impl Into<String>) -> Self {
        self.time_dimension = Some(time_dimension.into());
        self
    }

    /// Resolved time dimension name
    pub fn time_dimension(&self) -> &str {
        self.time_dimension.as_deref().unwrap_or(TIME_DIMENSION)
    }
}
