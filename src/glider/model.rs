use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the shared time vector in a [`CalibrationResult`]
pub const CALIBRATION_TIME_KEY: &str = "t";

/// Parameters of a glider flight model
///
/// `parameters` lists the parameter names in write order. Units and scalar
/// values are looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightModel {
    /// Parameter names, in write order
    pub parameters: Vec<String>,

    /// Unit of each parameter
    pub units: BTreeMap<String, String>,

    /// Scalar value of each parameter
    pub values: BTreeMap<String, f64>,
}

impl FlightModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter with its unit and scalar value
    pub fn with_parameter(mut self, name: &str, unit: &str, value: f64) -> Self {
        self.parameters.push(name.to_string());
        self.units.insert(name.to_string(), unit.to_string());
        self.values.insert(name.to_string(), value);
        self
    }

    /// Unit of a parameter
    pub fn unit(&self, name: &str) -> Option<&str> {
        self.units.get(name).map(String::as_str)
    }

    /// Scalar value of a parameter
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

/// Time-resolved calibration of flight-model parameters
///
/// An ordered mapping from parameter name to series. The shared time vector is
/// stored under `t`; every other entry is a calibrated parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationResult {
    entries: Vec<(String, Vec<f64>)>,
}

impl CalibrationResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result with the shared time vector set
    pub fn with_time(t: Vec<f64>) -> Self {
        let mut result = Self::new();
        result.insert(CALIBRATION_TIME_KEY, t);
        result
    }

    /// Insert or replace an entry, keeping its position on replace
    pub fn insert(&mut self, name: &str, series: Vec<f64>) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = series,
            None => self.entries.push((name.to_string(), series)),
        }
    }

    /// Builder form of [`CalibrationResult::insert`]
    pub fn with_series(mut self, name: &str, series: Vec<f64>) -> Self {
        self.insert(name, series);
        self
    }

    /// Look up an entry
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, series)| series.as_slice())
    }

    /// Returns true when `name` is an entry (the time vector included)
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The shared time vector
    pub fn time(&self) -> Option<&[f64]> {
        self.get(CALIBRATION_TIME_KEY)
    }

    /// Calibrated parameters in insertion order, without the time vector
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries
            .iter()
            .filter(|(key, _)| key != CALIBRATION_TIME_KEY)
            .map(|(key, series)| (key.as_str(), series.as_slice()))
    }
}

/// One row of the model output table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOutput {
    /// Variable name
    pub name: &'static str,
    /// Unit
    pub unit: &'static str,
    /// Written as `standard_name`
    pub long_name: &'static str,
}

const fn output(name: &'static str, unit: &'static str, long_name: &'static str) -> ModelOutput {
    ModelOutput {
        name,
        unit,
        long_name,
    }
}

/// Flight model outputs in write order
pub static MODEL_OUTPUTS: [ModelOutput; 15] = [
    output("u", "m s^{-1}", "horizontal velocity relative to water (in flight direction)"),
    output("w", "m s^{-1}", "vertical velocity relative to water"),
    output("U", "m s^{-1}", "speed through water"),
    output("alpha", "rad", "angle of attack"),
    output("pitch", "rad", "pitch angle"),
    output("ww", "m s^{-1}", "vertical water velocity"),
    output("heading", "rad", "heading angle"),
    output("depth", "m", "depth"),
    output("lat", "decimal degree", "latitude"),
    output("lon", "decimal degree", "longitude"),
    output("density", "kg m^{-3}", "in-situ density"),
    output("SA", "kg kg^{-1}", "absolute salinity"),
    output("CT", "degree Celsius", "conservative temperature"),
    output("pot_density", "kg m^{-3}", "potential density"),
    output("buoyancy_change", "cc", "buoyancy_change"),
];

/// Time series computed by a glider flight model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Shared time vector
    pub t: Vec<f64>,
    /// Horizontal velocity relative to water
    pub u: Vec<f64>,
    /// Vertical velocity relative to water
    pub w: Vec<f64>,
    /// Speed through water
    #[serde(rename = "U")]
    pub speed: Vec<f64>,
    /// Angle of attack
    pub alpha: Vec<f64>,
    /// Pitch angle
    pub pitch: Vec<f64>,
    /// Vertical water velocity
    pub ww: Vec<f64>,
    /// Heading angle
    pub heading: Vec<f64>,
    /// Depth
    pub depth: Vec<f64>,
    /// Latitude
    pub lat: Vec<f64>,
    /// Longitude
    pub lon: Vec<f64>,
    /// In-situ density
    pub density: Vec<f64>,
    /// Absolute salinity
    #[serde(rename = "SA")]
    pub sa: Vec<f64>,
    /// Conservative temperature
    #[serde(rename = "CT")]
    pub ct: Vec<f64>,
    /// Potential density
    pub pot_density: Vec<f64>,
    /// Buoyancy change
    pub buoyancy_change: Vec<f64>,
}

impl ModelResult {
    /// Output series co-indexed with [`MODEL_OUTPUTS`]
    pub fn outputs(&self) -> [&[f64]; 15] {
        [
            self.u.as_slice(),
            self.w.as_slice(),
            self.speed.as_slice(),
            self.alpha.as_slice(),
            self.pitch.as_slice(),
            self.ww.as_slice(),
            self.heading.as_slice(),
            self.depth.as_slice(),
            self.lat.as_slice(),
            self.lon.as_slice(),
            self.density.as_slice(),
            self.sa.as_slice(),
            self.ct.as_slice(),
            self.pot_density.as_slice(),
            self.buoyancy_change.as_slice(),
        ]
    }
}

/// Thermal-lag correction coefficients of a CTD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalLagCoefficients {
    /// Amplitude coefficient
    pub alpha: f64,
    /// Relaxation coefficient
    pub beta: f64,
    /// Time constant
    pub tau: f64,
}

impl ThermalLagCoefficients {
    /// Coefficients with their names and units, in write order
    pub fn entries(&self) -> [(&'static str, &'static str, f64); 3] {
        [
            ("alpha", "-", self.alpha),
            ("beta", "s", self.beta),
            ("tau", "s", self.tau),
        ]
    }
}

impl From<[f64; 3]> for ThermalLagCoefficients {
    fn from([alpha, beta, tau]: [f64; 3]) -> Self {
        Self { alpha, beta, tau }
    }
}
