use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::attributes::AttrValue;
use crate::schema::{
    DataType, DimensionInfo, DimensionLength, Header, VariableInfo, CFDATASET_MIMETYPE,
    HEADER_ENTRY, VARIABLES_DIR,
};

use super::memory::MemoryStore;
use super::{payload, AttributeTarget, Storage, StorageError, StoreConfig};

/// Single-file ZIP container backend
///
/// In write mode the file is created (or truncated) immediately and the
/// mimetype entry is written first. Header state and payloads are buffered in
/// memory and written on [`Storage::close`], because the header can change
/// until the last call. In read mode the header is parsed on open and payloads
/// are re-read from disk on every [`Storage::values`] call.
pub struct ContainerStore {
    path: PathBuf,
    tables: MemoryStore,
    zip_writer: Option<ZipWriter<BufWriter<File>>>,
    config: StoreConfig,
}

impl ContainerStore {
    /// Create a new container for writing with the default configuration
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::create_with_config(path, StoreConfig::default())
    }

    /// Create a new container for writing
    pub fn create_with_config<P: AsRef<Path>>(
        path: P,
        config: StoreConfig,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if path.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath("Empty path".to_string()));
        }
        if path.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "{} is a directory",
                path.display()
            )));
        }
        if !config.overwrite && path.exists() {
            return Err(StorageError::AlreadyExists(path.display().to_string()));
        }

        let file = File::create(&path)?;
        let mut zip_writer = ZipWriter::new(BufWriter::new(file));

        // mimetype MUST be the first entry and uncompressed
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        zip_writer.start_file("mimetype", options)?;
        zip_writer.write_all(CFDATASET_MIMETYPE.as_bytes())?;

        log::debug!("Created dataset container {}", path.display());

        Ok(Self {
            path,
            tables: MemoryStore::new(),
            zip_writer: Some(zip_writer),
            config,
        })
    }

    /// Open an existing container for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let mut archive = Self::open_archive(&path)?;

        let mut mimetype = String::new();
        archive
            .by_name("mimetype")
            .map_err(|_| StorageError::InvalidFormat("ZIP container missing mimetype".to_string()))?
            .read_to_string(&mut mimetype)?;
        if mimetype.trim() != CFDATASET_MIMETYPE {
            return Err(StorageError::InvalidFormat(format!(
                "unexpected mimetype '{}'",
                mimetype.trim()
            )));
        }

        let mut header_json = String::new();
        archive
            .by_name(HEADER_ENTRY)
            .map_err(|_| {
                StorageError::InvalidFormat(format!("ZIP container missing {}", HEADER_ENTRY))
            })?
            .read_to_string(&mut header_json)?;
        let header = Header::from_json(&header_json)?;

        log::debug!(
            "Opened dataset container {} ({} dimensions, {} variables)",
            path.display(),
            header.dimensions.len(),
            header.variables.len()
        );

        Ok(Self {
            path,
            tables: MemoryStore::from_header(header, true),
            zip_writer: None,
            config: StoreConfig::default(),
        })
    }

    /// Path of the container file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, StorageError> {
        let file = File::open(path)?;
        Ok(ZipArchive::new(BufReader::new(file))?)
    }

    fn read_entry(&self, entry: &str) -> Result<Vec<f64>, StorageError> {
        let mut archive = Self::open_archive(&self.path)?;
        let mut file = archive.by_name(entry).map_err(|_| {
            StorageError::InvalidFormat(format!("ZIP container missing {}", entry))
        })?;

        let mut buffer = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buffer)?;
        payload::decode(Bytes::from(buffer))
    }

    fn finish_container(
        &mut self,
        mut zip_writer: ZipWriter<BufWriter<File>>,
    ) -> Result<u64, StorageError> {
        let mut header = self.tables.header().clone();
        let mut payloads = Vec::new();

        for (index, variable) in header.variables.iter_mut().enumerate() {
            if let Some(values) = self.tables.payload(&variable.info.name) {
                let entry = format!("{}/{:04}.parquet", VARIABLES_DIR, index);
                let data = payload::encode(
                    &variable.info.name,
                    variable.info.dtype,
                    &variable.info.shape,
                    values,
                    &self.config,
                )?;
                variable.entry = Some(entry.clone());
                payloads.push((entry, data));
            }
        }

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        zip_writer.start_file(HEADER_ENTRY, options)?;
        zip_writer.write_all(header.to_json()?.as_bytes())?;

        // Payloads are already compressed by Parquet
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        for (entry, data) in payloads {
            zip_writer.start_file(entry, options)?;
            zip_writer.write_all(&data)?;
        }

        let inner = zip_writer.finish()?;
        inner.into_inner().map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to flush ZIP buffer: {}", e.error()),
            ))
        })?;

        Ok(fs::metadata(&self.path)?.len())
    }
}

impl std::fmt::Debug for ContainerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerStore")
            .field("path", &self.path)
            .field("writable", &self.is_writable())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Storage for ContainerStore {
    fn is_writable(&self) -> bool {
        self.tables.is_writable()
    }

    fn is_closed(&self) -> bool {
        self.tables.is_closed()
    }

    fn create_dimension(
        &mut self,
        name: &str,
        length: DimensionLength,
    ) -> Result<(), StorageError> {
        self.tables.create_dimension(name, length)
    }

    fn create_variable(
        &mut self,
        name: &str,
        dtype: DataType,
        dimensions: &[&str],
    ) -> Result<(), StorageError> {
        self.tables.create_variable(name, dtype, dimensions)
    }

    fn put_attribute(
        &mut self,
        target: AttributeTarget<'_>,
        name: &str,
        value: AttrValue,
    ) -> Result<(), StorageError> {
        self.tables.put_attribute(target, name, value)
    }

    fn put_values(&mut self, variable: &str, values: &[f64]) -> Result<(), StorageError> {
        self.tables.put_values(variable, values)
    }

    fn values(&self, variable: &str) -> Result<Vec<f64>, StorageError> {
        if self.zip_writer.is_some() {
            return self.tables.values(variable);
        }

        if self.tables.is_closed() {
            return Err(StorageError::Closed);
        }
        let header = self
            .tables
            .header()
            .variable(variable)
            .ok_or_else(|| StorageError::UnknownVariable(variable.to_string()))?;
        match &header.entry {
            Some(entry) => self.read_entry(entry),
            None => Ok(Vec::new()),
        }
    }

    fn attribute(
        &self,
        target: AttributeTarget<'_>,
        name: &str,
    ) -> Result<Option<AttrValue>, StorageError> {
        self.tables.attribute(target, name)
    }

    fn attributes(
        &self,
        target: AttributeTarget<'_>,
    ) -> Result<BTreeMap<String, AttrValue>, StorageError> {
        self.tables.attributes(target)
    }

    fn dimension(&self, name: &str) -> Result<Option<DimensionInfo>, StorageError> {
        self.tables.dimension(name)
    }

    fn dimensions(&self) -> Result<Vec<DimensionInfo>, StorageError> {
        self.tables.dimensions()
    }

    fn variable(&self, name: &str) -> Result<Option<VariableInfo>, StorageError> {
        self.tables.variable(name)
    }

    fn variable_names(&self) -> Result<Vec<String>, StorageError> {
        self.tables.variable_names()
    }

    fn close(&mut self) -> Result<u64, StorageError> {
        if self.tables.is_closed() {
            return Err(StorageError::Closed);
        }

        let result = match self.zip_writer.take() {
            Some(zip_writer) => self.finish_container(zip_writer),
            None => fs::metadata(&self.path)
                .map(|m| m.len())
                .map_err(StorageError::from),
        };
        self.tables.close()?;
        result
    }
}
