use crate::dataset::{DatasetError, DatasetWriter, ParameterOptions};
use crate::schema::{DataType, GROUP_SEPARATOR};
use crate::storage::Storage;

use super::error::SerializerError;
use super::model::{
    CalibrationResult, FlightModel, ModelResult, ThermalLagCoefficients, MODEL_OUTPUTS,
};

/// Group of the flight-model parameters
pub const GLIDER_FLIGHT_GROUP: &str = "glider_flight";

/// Time dimension of the calibration series
pub const GLIDER_FLIGHT_TIME_DIMENSION: &str = "Tgf";

/// Group of the thermal-lag coefficients
pub const THERMAL_LAG_GROUP: &str = "thermal_lag_coefs";

fn grouped(group: &str, name: &str) -> String {
    format!("{}{}{}", group, GROUP_SEPARATOR, name)
}

fn check_length(name: &str, t: &[f64], values: &[f64]) -> Result<(), SerializerError> {
    if values.len() != t.len() {
        return Err(DatasetError::LengthMismatch {
            name: name.to_string(),
            expected: t.len(),
            actual: values.len(),
        }
        .into());
    }
    Ok(())
}

/// Writes glider flight-model results through a [`DatasetWriter`]
///
/// Each method checks units, values, the calibration time and series lengths
/// before the first variable is written, so those errors leave the dataset
/// untouched. Storage errors raised mid-way, such as a name collision, can
/// leave earlier variables in place.
pub struct GliderFlightSerializer<'a, S: Storage> {
    writer: &'a mut DatasetWriter<S>,
}

impl<'a, S: Storage> GliderFlightSerializer<'a, S> {
    /// Borrow a writer for serialization
    pub fn new(writer: &'a mut DatasetWriter<S>) -> Self {
        Self { writer }
    }

    /// Write the flight-model parameters under `glider_flight/`
    ///
    /// Parameters without a calibration series become scalar meta variables.
    /// Calibrated parameters become time series on the `Tgf` dimension, sharing
    /// the calibration time vector.
    pub fn write_glider_flight_parameters(
        &mut self,
        model: &FlightModel,
        calibration: &CalibrationResult,
    ) -> Result<(), SerializerError> {
        let mut scalars = Vec::new();
        for name in &model.parameters {
            if calibration.contains(name) {
                continue;
            }
            let unit = model
                .unit(name)
                .ok_or_else(|| SerializerError::MissingUnit(name.clone()))?;
            let value = model
                .value(name)
                .ok_or_else(|| SerializerError::MissingValue(name.clone()))?;
            scalars.push((name.as_str(), unit, value));
        }

        let mut series = Vec::new();
        for (name, values) in calibration.parameters() {
            let unit = model
                .unit(name)
                .ok_or_else(|| SerializerError::MissingUnit(name.to_string()))?;
            series.push((name, unit, values));
        }
        let t: &[f64] = match calibration.time() {
            Some(t) => t,
            None if series.is_empty() => &[],
            None => return Err(SerializerError::MissingTime),
        };
        for (name, _, values) in &series {
            check_length(&grouped(GLIDER_FLIGHT_GROUP, name), t, values)?;
        }

        for (name, unit, value) in scalars {
            self.writer.add_meta_variable(
                &grouped(GLIDER_FLIGHT_GROUP, name),
                unit,
                value,
                DataType::default(),
            )?;
        }
        for (name, unit, values) in series {
            self.writer.add_time_series(
                &grouped(GLIDER_FLIGHT_GROUP, name),
                unit,
                t,
                values,
                ParameterOptions::new().with_time_dimension(GLIDER_FLIGHT_TIME_DIMENSION),
            )?;
        }

        log::debug!(
            "Wrote glider flight parameters ({} calibrated)",
            calibration.parameters().count()
        );
        Ok(())
    }

    /// Write the model outputs as top-level time series
    pub fn write_model_results(&mut self, result: &ModelResult) -> Result<(), SerializerError> {
        for (output, values) in MODEL_OUTPUTS.iter().zip(result.outputs()) {
            check_length(output.name, &result.t, values)?;
        }
        for (output, values) in MODEL_OUTPUTS.iter().zip(result.outputs()) {
            self.writer.add_time_series(
                output.name,
                output.unit,
                &result.t,
                values,
                ParameterOptions::new().with_standard_name(output.long_name),
            )?;
        }
        Ok(())
    }

    /// Write the thermal-lag coefficients under `thermal_lag_coefs/`
    pub fn write_thermal_lag_coefs(
        &mut self,
        coefficients: &ThermalLagCoefficients,
    ) -> Result<(), SerializerError> {
        for (name, unit, value) in coefficients.entries() {
            self.writer.add_meta_variable(
                &grouped(THERMAL_LAG_GROUP, name),
                unit,
                value,
                DataType::default(),
            )?;
        }
        Ok(())
    }
}
