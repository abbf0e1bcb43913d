use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::schema::{DataType, VALUES_COLUMN};

/// Compression options for variable payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Configuration for the container store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Compression applied inside each Parquet payload
    pub compression: CompressionType,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write column statistics
    pub write_statistics: bool,

    /// Enable BYTE_STREAM_SPLIT encoding for floating-point payloads.
    /// Smooth time series (positions, depths, velocities) compress noticeably
    /// better with it.
    pub use_byte_stream_split: bool,

    /// Replace an existing file when creating a container
    pub overwrite: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            data_page_size: 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
            overwrite: true,
        }
    }
}

impl StoreConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::Zstd(22),
            data_page_size: 2 * 1024 * 1024,
            ..Self::default()
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast() -> Self {
        Self {
            compression: CompressionType::Snappy,
            write_statistics: false,
            use_byte_stream_split: false,
            ..Self::default()
        }
    }

    /// Build Parquet writer properties for a payload of the given type
    pub(crate) fn to_writer_properties(
        &self,
        dtype: DataType,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let values_path = ColumnPath::new(vec![VALUES_COLUMN.to_string()]);

        // Measurement series are high-cardinality; dictionaries only cost space.
        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_column_dictionary_enabled(values_path.clone(), false);

        if self.use_byte_stream_split && dtype.is_float() {
            builder = builder.set_column_encoding(values_path, Encoding::BYTE_STREAM_SPLIT);
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}
