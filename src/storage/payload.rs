//! Parquet encoding of variable payloads.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array};
use arrow::datatypes::{DataType as ArrowType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use crate::schema::{DataType, KEY_VARIABLE_NAME, KEY_VARIABLE_SHAPE, VALUES_COLUMN};

use super::{StorageError, StoreConfig};

fn arrow_type(dtype: DataType) -> ArrowType {
    match dtype {
        DataType::Float32 => ArrowType::Float32,
        DataType::Float64 => ArrowType::Float64,
        DataType::Int32 => ArrowType::Int32,
    }
}

/// Encode one variable payload as a single-column Parquet file
pub(super) fn encode(
    name: &str,
    dtype: DataType,
    shape: &[usize],
    values: &[f64],
    config: &StoreConfig,
) -> Result<Vec<u8>, StorageError> {
    let schema = Arc::new(Schema::new(vec![Field::new(
        VALUES_COLUMN,
        arrow_type(dtype),
        false,
    )]));

    let array: ArrayRef = match dtype {
        DataType::Float32 => Arc::new(Float32Array::from_iter_values(
            values.iter().map(|v| *v as f32),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(values.to_vec())),
        DataType::Int32 => Arc::new(Int32Array::from_iter_values(
            values.iter().map(|v| *v as i32),
        )),
    };
    let batch = RecordBatch::try_new(schema.clone(), vec![array])?;

    let mut metadata = HashMap::new();
    metadata.insert(KEY_VARIABLE_NAME.to_string(), name.to_string());
    metadata.insert(KEY_VARIABLE_SHAPE.to_string(), serde_json::to_string(shape)?);
    let props = config.to_writer_properties(dtype, &metadata);

    let mut writer = ArrowWriter::try_new(Vec::new(), schema, Some(props))?;
    writer.write(&batch)?;
    Ok(writer.into_inner()?)
}

/// Decode a payload written by [`encode`] back into row-major `f64` values
pub(super) fn decode(bytes: Bytes) -> Result<Vec<f64>, StorageError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)?.build()?;

    let mut values = Vec::new();
    for batch in reader {
        let batch = batch?;
        let column = batch.column_by_name(VALUES_COLUMN).ok_or_else(|| {
            StorageError::InvalidFormat(format!("payload missing '{}' column", VALUES_COLUMN))
        })?;
        extend_values(&mut values, column.as_ref())?;
    }
    Ok(values)
}

fn extend_values(values: &mut Vec<f64>, column: &dyn Array) -> Result<(), StorageError> {
    let any = column.as_any();
    if let Some(array) = any.downcast_ref::<Float64Array>() {
        values.extend(array.values().iter().copied());
    } else if let Some(array) = any.downcast_ref::<Float32Array>() {
        values.extend(array.values().iter().map(|v| *v as f64));
    } else if let Some(array) = any.downcast_ref::<Int32Array>() {
        values.extend(array.values().iter().map(|v| *v as f64));
    } else {
        return Err(StorageError::InvalidFormat(format!(
            "unsupported payload type {}",
            column.data_type()
        )));
    }
    Ok(())
}
