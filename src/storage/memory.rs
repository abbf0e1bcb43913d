use std::collections::{BTreeMap, HashMap};

use crate::attributes::AttrValue;
use crate::schema::{DataType, DimensionInfo, DimensionLength, Header, VariableHeader, VariableInfo};

use super::{AttributeTarget, Storage, StorageError};

/// In-memory storage backend
///
/// Holds the header tables and payloads in memory. It enforces the same
/// shape, naming and lifecycle rules as [`super::ContainerStore`], which uses
/// it for its own bookkeeping.
#[derive(Debug, Default)]
pub struct MemoryStore {
    header: Header,
    payloads: HashMap<String, Vec<f64>>,
    read_only: bool,
    closed: bool,
}

impl MemoryStore {
    /// Create an empty, writable store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a parsed header (payloads are not loaded)
    pub(crate) fn from_header(header: Header, read_only: bool) -> Self {
        Self {
            header,
            payloads: HashMap::new(),
            read_only,
            closed: false,
        }
    }

    /// Header tables as they currently stand
    pub(crate) fn header(&self) -> &Header {
        &self.header
    }

    /// In-memory payload of a variable, if one was assigned
    pub(crate) fn payload(&self, variable: &str) -> Option<&[f64]> {
        self.payloads.get(variable).map(Vec::as_slice)
    }

    /// Total number of values held in memory
    pub fn values_held(&self) -> usize {
        self.payloads.values().map(Vec::len).sum()
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), StorageError> {
        self.ensure_open()?;
        if self.read_only {
            return Err(StorageError::ReadOnly);
        }
        Ok(())
    }

    fn variable_index(&self, name: &str) -> Result<usize, StorageError> {
        self.header
            .variables
            .iter()
            .position(|v| v.info.name == name)
            .ok_or_else(|| StorageError::UnknownVariable(name.to_string()))
    }

    fn dimension_index(&self, name: &str) -> Result<usize, StorageError> {
        self.header
            .dimensions
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| StorageError::UnknownDimension(name.to_string()))
    }

    fn attribute_map(
        &self,
        target: AttributeTarget<'_>,
    ) -> Result<&BTreeMap<String, AttrValue>, StorageError> {
        match target {
            AttributeTarget::Global => Ok(&self.header.attributes),
            AttributeTarget::Variable(name) => {
                let index = self.variable_index(name)?;
                Ok(&self.header.variables[index].info.attributes)
            }
        }
    }

    /// Resolve the payload shape of a variable and the growth of its unlimited axis
    fn payload_shape(
        &self,
        info: &VariableInfo,
        len: usize,
    ) -> Result<(Vec<usize>, Option<(usize, usize)>), StorageError> {
        let mismatch = |reason: String| StorageError::ShapeMismatch {
            variable: info.name.clone(),
            reason,
        };

        let mut shape = Vec::with_capacity(info.dimensions.len());
        let mut fixed_product = 1usize;
        let mut unlimited = None;

        for (axis, dim_name) in info.dimensions.iter().enumerate() {
            let dim_index = self.dimension_index(dim_name)?;
            match self.header.dimensions[dim_index].length {
                DimensionLength::Fixed(n) => {
                    fixed_product *= n;
                    shape.push(n);
                }
                DimensionLength::Unlimited => {
                    unlimited = Some((axis, dim_index));
                    shape.push(0);
                }
            }
        }

        match unlimited {
            None => {
                if len != fixed_product {
                    return Err(mismatch(format!(
                        "expected {} values, got {}",
                        fixed_product, len
                    )));
                }
                Ok((shape, None))
            }
            Some((axis, dim_index)) => {
                let records = if fixed_product == 0 {
                    if len != 0 {
                        return Err(mismatch(format!(
                            "expected no values along a zero-length axis, got {}",
                            len
                        )));
                    }
                    0
                } else {
                    if len % fixed_product != 0 {
                        return Err(mismatch(format!(
                            "{} values do not divide into records of {}",
                            len, fixed_product
                        )));
                    }
                    len / fixed_product
                };
                shape[axis] = records;
                Ok((shape, Some((dim_index, records))))
            }
        }
    }
}

impl Storage for MemoryStore {
    fn is_writable(&self) -> bool {
        !self.read_only && !self.closed
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn create_dimension(
        &mut self,
        name: &str,
        length: DimensionLength,
    ) -> Result<(), StorageError> {
        self.ensure_writable()?;
        if self.header.dimension(name).is_some() {
            return Err(StorageError::DuplicateDimension(name.to_string()));
        }

        let current_length = match length {
            DimensionLength::Fixed(n) => n,
            DimensionLength::Unlimited => 0,
        };
        self.header.dimensions.push(DimensionInfo {
            name: name.to_string(),
            length,
            current_length,
        });
        Ok(())
    }

    fn create_variable(
        &mut self,
        name: &str,
        dtype: DataType,
        dimensions: &[&str],
    ) -> Result<(), StorageError> {
        self.ensure_writable()?;
        if self.header.variable(name).is_some() {
            return Err(StorageError::DuplicateVariable(name.to_string()));
        }

        let mut unlimited = 0;
        for dim_name in dimensions {
            let index = self.dimension_index(dim_name)?;
            if self.header.dimensions[index].length.is_unlimited() {
                unlimited += 1;
            }
        }
        if unlimited > 1 {
            return Err(StorageError::MultipleUnlimited(name.to_string()));
        }

        self.header.variables.push(VariableHeader {
            info: VariableInfo {
                name: name.to_string(),
                dtype,
                dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
                shape: Vec::new(),
                attributes: BTreeMap::new(),
            },
            entry: None,
        });
        Ok(())
    }

    fn put_attribute(
        &mut self,
        target: AttributeTarget<'_>,
        name: &str,
        value: AttrValue,
    ) -> Result<(), StorageError> {
        self.ensure_writable()?;
        let map = match target {
            AttributeTarget::Global => &mut self.header.attributes,
            AttributeTarget::Variable(var) => {
                let index = self.variable_index(var)?;
                &mut self.header.variables[index].info.attributes
            }
        };
        map.insert(name.to_string(), value);
        Ok(())
    }

    fn put_values(&mut self, variable: &str, values: &[f64]) -> Result<(), StorageError> {
        self.ensure_writable()?;
        let index = self.variable_index(variable)?;
        let (shape, growth) = self.payload_shape(&self.header.variables[index].info, values.len())?;

        let dtype = self.header.variables[index].info.dtype;
        let converted = values
            .iter()
            .map(|&value| {
                dtype.cast(value).ok_or_else(|| StorageError::ValueOutOfRange {
                    variable: variable.to_string(),
                    dtype,
                    value,
                })
            })
            .collect::<Result<Vec<f64>, StorageError>>()?;

        if let Some((dim_index, records)) = growth {
            let dim = &mut self.header.dimensions[dim_index];
            dim.current_length = dim.current_length.max(records);
        }

        let info = &mut self.header.variables[index].info;
        info.shape = shape;
        self.payloads.insert(variable.to_string(), converted);
        Ok(())
    }

    fn values(&self, variable: &str) -> Result<Vec<f64>, StorageError> {
        self.ensure_open()?;
        self.variable_index(variable)?;
        Ok(self.payload(variable).map(<[f64]>::to_vec).unwrap_or_default())
    }

    fn attribute(
        &self,
        target: AttributeTarget<'_>,
        name: &str,
    ) -> Result<Option<AttrValue>, StorageError> {
        self.ensure_open()?;
        Ok(self.attribute_map(target)?.get(name).cloned())
    }

    fn attributes(
        &self,
        target: AttributeTarget<'_>,
    ) -> Result<BTreeMap<String, AttrValue>, StorageError> {
        self.ensure_open()?;
        Ok(self.attribute_map(target)?.clone())
    }

    fn dimension(&self, name: &str) -> Result<Option<DimensionInfo>, StorageError> {
        self.ensure_open()?;
        Ok(self.header.dimension(name).cloned())
    }

    fn dimensions(&self) -> Result<Vec<DimensionInfo>, StorageError> {
        self.ensure_open()?;
        Ok(self.header.dimensions.clone())
    }

    fn variable(&self, name: &str) -> Result<Option<VariableInfo>, StorageError> {
        self.ensure_open()?;
        Ok(self.header.variable(name).map(|v| v.info.clone()))
    }

    fn variable_names(&self) -> Result<Vec<String>, StorageError> {
        self.ensure_open()?;
        Ok(self
            .header
            .variables
            .iter()
            .map(|v| v.info.name.clone())
            .collect())
    }

    fn close(&mut self) -> Result<u64, StorageError> {
        self.ensure_open()?;
        self.closed = true;
        Ok((self.values_held() * std::mem::size_of::<f64>()) as u64)
    }
}
