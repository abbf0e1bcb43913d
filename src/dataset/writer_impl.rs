use std::collections::BTreeMap;
use std::path::Path;

use crate::attributes::{self, AttrValue};
use crate::metadata::GlobalMetadata;
use crate::schema::{
    DataType, DimensionInfo, DimensionLength, VariableInfo, ATTR_CONTACT, ATTR_CONVENTIONS,
    ATTR_CREATION_DATE, ATTR_INSTITUTION, ATTR_LONG_NAME, ATTR_ORIGINATOR, ATTR_POSITIVE,
    ATTR_SOURCE, ATTR_STANDARD_NAME, ATTR_TITLE, ATTR_UNITS, CONVENTIONS, CREATION_DATE_FORMAT,
    DEPTH_DIMENSION, DEPTH_LONG_NAME, DEPTH_POSITIVE, DEPTH_STANDARD_NAME, DEPTH_UNITS,
    DEPTH_VARIABLE, INSTITUTION, TIME_STANDARD_NAME, TIME_UNITS, TIME_VARIABLE,
};
use crate::storage::{AttributeTarget, ContainerStore, Storage, StorageError, StoreConfig};

use super::error::DatasetError;
use super::group_path::GroupPath;
use super::registry::{Coordinate, DimensionRegistry};
use super::stats::DatasetStats;
use super::types::{OpenMode, ParameterOptions};

/// Writer for convention-compliant array datasets
///
/// Dimensions are created lazily: the first series on a time dimension
/// creates that dimension and its time coordinate, the first depth profile
/// creates the `Z` axis and its `z` coordinate. Later series reuse them.
///
/// Closing consumes the writer. A writer that is dropped without calling
/// [`DatasetWriter::close`] closes its storage on drop and logs any failure.
pub struct DatasetWriter<S: Storage = ContainerStore> {
    storage: S,
    registry: DimensionRegistry,
    mode: OpenMode,
    closed: bool,
}

impl DatasetWriter<ContainerStore> {
    /// Create a new dataset file and write its global metadata
    ///
    /// Metadata is coerced before the file is touched, so a metadata error
    /// leaves nothing on disk.
    pub fn create<P: AsRef<Path>>(path: P, metadata: &GlobalMetadata) -> Result<Self, DatasetError> {
        Self::create_with_config(path, metadata, StoreConfig::default())
    }

    /// Create a new dataset file with a custom store configuration
    pub fn create_with_config<P: AsRef<Path>>(
        path: P,
        metadata: &GlobalMetadata,
        config: StoreConfig,
    ) -> Result<Self, DatasetError> {
        let attributes = global_attributes(metadata)?;
        let storage = ContainerStore::create_with_config(path, config)?;
        Self::init(storage, OpenMode::Write, attributes)
    }

    /// Open a dataset file in the given mode
    ///
    /// `metadata` is only used in [`OpenMode::Write`].
    pub fn open<P: AsRef<Path>>(
        path: P,
        mode: OpenMode,
        metadata: &GlobalMetadata,
    ) -> Result<Self, DatasetError> {
        match mode {
            OpenMode::Write => Self::create(path, metadata),
            OpenMode::Read => Self::open_read(path),
        }
    }

    /// Open an existing dataset file for reading
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let storage = ContainerStore::open(path)?;
        Self::init(storage, OpenMode::Read, Vec::new())
    }
}

impl<S: Storage> DatasetWriter<S> {
    /// Bind a writer to an already opened storage backend
    pub fn with_storage(
        storage: S,
        mode: OpenMode,
        metadata: &GlobalMetadata,
    ) -> Result<Self, DatasetError> {
        let attributes = match mode {
            OpenMode::Write => global_attributes(metadata)?,
            OpenMode::Read => Vec::new(),
        };
        Self::init(storage, mode, attributes)
    }

    fn init(
        storage: S,
        mode: OpenMode,
        attributes: Vec<(String, AttrValue)>,
    ) -> Result<Self, DatasetError> {
        let mut writer = Self {
            storage,
            registry: DimensionRegistry::new(),
            mode,
            closed: false,
        };

        for (name, value) in attributes {
            writer
                .storage
                .put_attribute(AttributeTarget::Global, &name, value)?;
        }

        log::info!("Opened dataset in {:?} mode", mode);
        Ok(writer)
    }

    /// Add a scalar variable carrying a unit
    ///
    /// No dimension is involved. The value is stored with `dtype` precision;
    /// `Int32` truncates toward zero and rejects NaN, infinities and values
    /// outside the `i32` range before the variable is created.
    pub fn add_meta_variable(
        &mut self,
        name: &str,
        unit: &str,
        value: f64,
        dtype: DataType,
    ) -> Result<(), DatasetError> {
        self.ensure_writable()?;
        let path = GroupPath::parse(name)?;
        if dtype.cast(value).is_none() {
            return Err(StorageError::ValueOutOfRange {
                variable: path.as_str().to_string(),
                dtype,
                value,
            }
            .into());
        }

        self.storage.create_variable(path.as_str(), dtype, &[])?;
        self.put_variable_attribute(&path, ATTR_UNITS, unit)?;
        self.storage.put_values(path.as_str(), &[value])?;

        log::debug!("Added meta variable {} = {} {}", path, value, unit);
        Ok(())
    }

    /// Add a time series or a time-by-depth series
    ///
    /// `series` is either `[time, values]` or `[time, depth, values]`, where
    /// 2-D values are row-major `time x depth`. Any other number of series is
    /// rejected before anything is created. All lengths are checked before the
    /// first dimension is touched.
    pub fn add_parameter(
        &mut self,
        name: &str,
        unit: &str,
        series: &[&[f64]],
        options: ParameterOptions,
    ) -> Result<(), DatasetError> {
        self.ensure_writable()?;
        let (t, z, values) = match *series {
            [t, values] => (t, None, values),
            [t, z, values] => (t, Some(z), values),
            _ => {
                return Err(DatasetError::Arity {
                    name: name.to_string(),
                    given: series.len(),
                })
            }
        };

        let path = GroupPath::parse(name)?;
        self.check_lengths(&path, t, z, values)?;

        let time_dimension = options.time_dimension();
        let time_coordinate = path.time_companion();
        self.registry.ensure_unbounded(
            &mut self.storage,
            time_dimension,
            Coordinate {
                variable: &time_coordinate,
                values: t,
                attributes: vec![
                    (ATTR_UNITS, TIME_UNITS.into()),
                    (ATTR_STANDARD_NAME, TIME_STANDARD_NAME.into()),
                ],
            },
        )?;

        let dimensions: Vec<&str> = match z {
            None => vec![time_dimension],
            Some(z) => {
                self.registry.ensure_fixed(
                    &mut self.storage,
                    DEPTH_DIMENSION,
                    z.len(),
                    Coordinate {
                        variable: DEPTH_VARIABLE,
                        values: z,
                        attributes: vec![
                            (ATTR_UNITS, DEPTH_UNITS.into()),
                            (ATTR_STANDARD_NAME, DEPTH_STANDARD_NAME.into()),
                            (ATTR_LONG_NAME, DEPTH_LONG_NAME.into()),
                            (ATTR_POSITIVE, DEPTH_POSITIVE.into()),
                        ],
                    },
                )?;
                vec![time_dimension, DEPTH_DIMENSION]
            }
        };

        self.storage
            .create_variable(path.as_str(), DataType::Float64, &dimensions)?;
        self.put_variable_attribute(&path, ATTR_UNITS, unit)?;
        if let Some(standard_name) = options.standard_name.as_deref() {
            self.put_variable_attribute(&path, ATTR_STANDARD_NAME, standard_name)?;
        }
        self.storage.put_values(path.as_str(), values)?;

        log::debug!(
            "Added parameter {} over {:?} ({} values)",
            path,
            dimensions,
            values.len()
        );
        Ok(())
    }

    /// Add a series on a time dimension
    pub fn add_time_series(
        &mut self,
        name: &str,
        unit: &str,
        t: &[f64],
        values: &[f64],
        options: ParameterOptions,
    ) -> Result<(), DatasetError> {
        self.add_parameter(name, unit, &[t, values], options)
    }

    /// Add a series over time and the depth axis (row-major `time x depth`)
    pub fn add_profile_series(
        &mut self,
        name: &str,
        unit: &str,
        t: &[f64],
        z: &[f64],
        values: &[f64],
        options: ParameterOptions,
    ) -> Result<(), DatasetError> {
        self.add_parameter(name, unit, &[t, z, values], options)
    }

    /// Read the primary time axis, then `parameter`, then each of `extra`
    ///
    /// Every call reads from storage.
    pub fn get(&self, parameter: &str, extra: &[&str]) -> Result<Vec<Vec<f64>>, DatasetError> {
        let mut result = Vec::with_capacity(2 + extra.len());
        result.push(self.storage.values(TIME_VARIABLE)?);
        result.push(self.storage.values(parameter)?);
        for name in extra {
            result.push(self.storage.values(name)?);
        }
        Ok(result)
    }

    /// Flush and release the dataset
    pub fn close(mut self) -> Result<DatasetStats, DatasetError> {
        let dimensions = self.storage.dimensions()?.len();
        let names = self.storage.variable_names()?;
        let mut values_written = 0;
        for name in &names {
            if let Some(info) = self.storage.variable(name)? {
                values_written += info.len();
            }
        }

        self.closed = true;
        let total_size_bytes = self.storage.close()?;

        let stats = DatasetStats {
            dimensions,
            variables: names.len(),
            values_written,
            total_size_bytes,
        };
        log::info!("Closed dataset: {}", stats);
        Ok(stats)
    }

    /// Access mode
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Underlying storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Dimensions created by this writer
    pub fn registry(&self) -> &DimensionRegistry {
        &self.registry
    }

    /// Read a global attribute
    pub fn global_attribute(&self, name: &str) -> Result<Option<AttrValue>, DatasetError> {
        Ok(self.storage.attribute(AttributeTarget::Global, name)?)
    }

    /// All global attributes
    pub fn global_attributes(&self) -> Result<BTreeMap<String, AttrValue>, DatasetError> {
        Ok(self.storage.attributes(AttributeTarget::Global)?)
    }

    /// Read an attribute of a variable
    pub fn variable_attribute(
        &self,
        variable: &str,
        name: &str,
    ) -> Result<Option<AttrValue>, DatasetError> {
        Ok(self
            .storage
            .attribute(AttributeTarget::Variable(variable), name)?)
    }

    /// Look up a variable descriptor
    pub fn variable(&self, name: &str) -> Result<Option<VariableInfo>, DatasetError> {
        Ok(self.storage.variable(name)?)
    }

    /// All variable names in creation order
    pub fn variable_names(&self) -> Result<Vec<String>, DatasetError> {
        Ok(self.storage.variable_names()?)
    }

    /// All dimensions in creation order
    pub fn dimensions(&self) -> Result<Vec<DimensionInfo>, DatasetError> {
        Ok(self.storage.dimensions()?)
    }

    /// Returns true when the dataset has a dimension called `name`
    pub fn has_dimension(&self, name: &str) -> Result<bool, DatasetError> {
        Ok(self.storage.dimension(name)?.is_some())
    }

    fn ensure_writable(&self) -> Result<(), DatasetError> {
        match self.mode {
            OpenMode::Write => Ok(()),
            OpenMode::Read => Err(StorageError::ReadOnly.into()),
        }
    }

    fn put_variable_attribute(
        &mut self,
        path: &GroupPath,
        name: &str,
        value: &str,
    ) -> Result<(), DatasetError> {
        self.storage
            .put_attribute(AttributeTarget::Variable(path.as_str()), name, value.into())?;
        Ok(())
    }

    fn check_lengths(
        &self,
        path: &GroupPath,
        t: &[f64],
        z: Option<&[f64]>,
        values: &[f64],
    ) -> Result<(), DatasetError> {
        let expected = match z {
            None => t.len(),
            Some(z) => {
                if let Some(dim) = self.registry.get(DEPTH_DIMENSION) {
                    if let DimensionLength::Fixed(n) = dim.length() {
                        if n != z.len() {
                            return Err(DatasetError::DepthMismatch {
                                name: path.to_string(),
                                expected: n,
                                actual: z.len(),
                            });
                        }
                    }
                }
                t.len() * z.len()
            }
        };

        if values.len() != expected {
            return Err(DatasetError::LengthMismatch {
                name: path.to_string(),
                expected,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

impl<S: Storage> Drop for DatasetWriter<S> {
    fn drop(&mut self) {
        if self.closed || self.storage.is_closed() {
            return;
        }
        // Errors cannot be returned from Drop
        if let Err(e) = self.storage.close() {
            log::warn!("Failed to close dataset on drop: {}", e);
        }
    }
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for DatasetWriter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetWriter")
            .field("storage", &self.storage)
            .field("mode", &self.mode)
            .field("dimensions", &self.registry.len())
            .finish()
    }
}

/// Global attributes written to every new dataset, in write order
fn global_attributes(metadata: &GlobalMetadata) -> Result<Vec<(String, AttrValue)>, DatasetError> {
    let creation_date = chrono::Utc::now()
        .format(CREATION_DATE_FORMAT)
        .to_string();

    let mut attributes = vec![
        (ATTR_CONVENTIONS.to_string(), AttrValue::from(CONVENTIONS)),
        (ATTR_INSTITUTION.to_string(), AttrValue::from(INSTITUTION)),
        (ATTR_TITLE.to_string(), AttrValue::from(metadata.title.as_str())),
        (ATTR_SOURCE.to_string(), AttrValue::from(metadata.source.as_str())),
        (ATTR_ORIGINATOR.to_string(), AttrValue::from(metadata.originator.as_str())),
        (ATTR_CONTACT.to_string(), AttrValue::from(metadata.contact.as_str())),
        (ATTR_CREATION_DATE.to_string(), AttrValue::from(creation_date)),
    ];
    for (key, value) in &metadata.extra {
        attributes.push((key.clone(), attributes::coerce(key, value)?));
    }
    Ok(attributes)
}
