//! # Glider Flight Serialization
//!
//! Fixed recipes that store the results of a glider flight-model calibration
//! through the [`DatasetWriter`](crate::dataset::DatasetWriter):
//!
//! | Method | Variables |
//! |--------|-----------|
//! | [`GliderFlightSerializer::write_glider_flight_parameters`] | `glider_flight/<p>`: scalars, or series on `Tgf` |
//! | [`GliderFlightSerializer::write_model_results`] | the 15 [`MODEL_OUTPUTS`] on `T` |
//! | [`GliderFlightSerializer::write_thermal_lag_coefs`] | `thermal_lag_coefs/{alpha,beta,tau}` |

mod error;
mod model;
mod serializer;

#[cfg(test)]
mod tests;

pub use error::SerializerError;
pub use model::{
    CalibrationResult, FlightModel, ModelOutput, ModelResult, ThermalLagCoefficients,
    CALIBRATION_TIME_KEY, MODEL_OUTPUTS,
};
pub use serializer::{
    GliderFlightSerializer, GLIDER_FLIGHT_GROUP, GLIDER_FLIGHT_TIME_DIMENSION, THERMAL_LAG_GROUP,
};
