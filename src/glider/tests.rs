use super::*;
use crate::attributes::AttrValue;
use crate::dataset::{DatasetError, DatasetWriter, OpenMode};
use crate::metadata::GlobalMetadata;
use crate::schema::DataType;
use crate::storage::{MemoryStore, Storage, StorageError};

fn memory_writer() -> DatasetWriter<MemoryStore> {
    DatasetWriter::with_storage(
        MemoryStore::new(),
        OpenMode::Write,
        &GlobalMetadata::template(),
    )
    .unwrap()
}

fn flight_model() -> FlightModel {
    FlightModel::new()
        .with_parameter("mass", "kg", 60.5)
        .with_parameter("Cd0", "-", 0.15)
        .with_parameter("Vg", "m^3", 0.062)
}

fn model_result(n: usize) -> ModelResult {
    let series = |offset: f64| (0..n).map(|i| offset + i as f64).collect::<Vec<_>>();
    ModelResult {
        t: series(0.0),
        u: series(1.0),
        w: series(2.0),
        speed: series(3.0),
        alpha: series(4.0),
        pitch: series(5.0),
        ww: series(6.0),
        heading: series(7.0),
        depth: series(8.0),
        lat: series(9.0),
        lon: series(10.0),
        density: series(11.0),
        sa: series(12.0),
        ct: series(13.0),
        pot_density: series(14.0),
        buoyancy_change: series(15.0),
    }
}

// ==================== Flight Parameter Tests ====================

#[test]
fn test_flight_parameters_scalar_and_calibrated() {
    let mut writer = memory_writer();
    let calibration = CalibrationResult::with_time(vec![0.0, 600.0, 1200.0])
        .with_series("Cd0", vec![0.15, 0.16, 0.14]);

    GliderFlightSerializer::new(&mut writer)
        .write_glider_flight_parameters(&flight_model(), &calibration)
        .unwrap();

    assert_eq!(
        writer.variable_names().unwrap(),
        vec![
            "glider_flight/mass",
            "glider_flight/Vg",
            "glider_flight/time",
            "glider_flight/Cd0",
        ]
    );

    let mass = writer.variable("glider_flight/mass").unwrap().unwrap();
    assert_eq!(mass.rank(), 0);
    assert_eq!(mass.dtype, DataType::Float32);

    let cd0 = writer.variable("glider_flight/Cd0").unwrap().unwrap();
    assert_eq!(cd0.dimensions, vec![GLIDER_FLIGHT_TIME_DIMENSION]);
    assert_eq!(
        writer.variable_attribute("glider_flight/Cd0", "units").unwrap(),
        Some(AttrValue::from("-"))
    );
    assert_eq!(
        writer.storage().values("glider_flight/time").unwrap(),
        vec![0.0, 600.0, 1200.0]
    );

    assert!(writer.has_dimension("Tgf").unwrap());
    assert!(!writer.has_dimension("T").unwrap());
}

#[test]
fn test_flight_parameters_without_calibration() {
    let mut writer = memory_writer();
    GliderFlightSerializer::new(&mut writer)
        .write_glider_flight_parameters(&flight_model(), &CalibrationResult::new())
        .unwrap();

    assert_eq!(writer.variable_names().unwrap().len(), 3);
    assert!(writer.dimensions().unwrap().is_empty());
}

#[test]
fn test_flight_parameters_missing_unit() {
    let mut writer = memory_writer();
    let calibration = CalibrationResult::with_time(vec![0.0]).with_series("Cl", vec![0.5]);

    let result = GliderFlightSerializer::new(&mut writer)
        .write_glider_flight_parameters(&flight_model(), &calibration);
    assert!(matches!(result, Err(SerializerError::MissingUnit(name)) if name == "Cl"));
    assert!(writer.variable_names().unwrap().is_empty());
}

#[test]
fn test_flight_parameters_missing_value() {
    let mut writer = memory_writer();
    let mut model = flight_model();
    model.parameters.push("ah".to_string());
    model.units.insert("ah".to_string(), "rad^{-1}".to_string());

    let result = GliderFlightSerializer::new(&mut writer)
        .write_glider_flight_parameters(&model, &CalibrationResult::new());
    assert!(matches!(result, Err(SerializerError::MissingValue(name)) if name == "ah"));
    assert!(writer.variable_names().unwrap().is_empty());
}

#[test]
fn test_flight_parameters_missing_time() {
    let mut writer = memory_writer();
    let calibration = CalibrationResult::new().with_series("Cd0", vec![0.15]);

    let result = GliderFlightSerializer::new(&mut writer)
        .write_glider_flight_parameters(&flight_model(), &calibration);
    assert!(matches!(result, Err(SerializerError::MissingTime)));
}

#[test]
fn test_flight_parameters_name_collision_keeps_scalars() {
    let mut writer = memory_writer();
    let mut model = flight_model();
    model.units.insert("time".to_string(), "s".to_string());
    let calibration =
        CalibrationResult::with_time(vec![0.0, 600.0]).with_series("time", vec![1.0, 2.0]);

    let result = GliderFlightSerializer::new(&mut writer)
        .write_glider_flight_parameters(&model, &calibration);
    assert!(matches!(
        result,
        Err(SerializerError::Dataset(DatasetError::Storage(
            StorageError::DuplicateVariable(ref name)
        ))) if name == "glider_flight/time"
    ));
    // Collisions are only detected by storage, after the scalars went in
    assert_eq!(
        writer.variable_names().unwrap(),
        vec![
            "glider_flight/mass",
            "glider_flight/Cd0",
            "glider_flight/Vg",
            "glider_flight/time",
        ]
    );
}

#[test]
fn test_calibration_result_order() {
    let mut calibration = CalibrationResult::new()
        .with_series("b", vec![1.0])
        .with_series("t", vec![0.0])
        .with_series("a", vec![2.0]);
    calibration.insert("b", vec![3.0]);

    let names: Vec<&str> = calibration.parameters().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(calibration.get("b"), Some(&[3.0][..]));
    assert_eq!(calibration.time(), Some(&[0.0][..]));
}

// ==================== Model Result Tests ====================

#[test]
fn test_model_results() {
    let mut writer = memory_writer();
    let result = model_result(5);

    GliderFlightSerializer::new(&mut writer)
        .write_model_results(&result)
        .unwrap();

    let names = writer.variable_names().unwrap();
    let expected: Vec<&str> = std::iter::once("time")
        .chain(MODEL_OUTPUTS.iter().map(|o| o.name))
        .collect();
    assert_eq!(names, expected);

    assert_eq!(
        writer.variable_attribute("U", "standard_name").unwrap(),
        Some(AttrValue::from("speed through water"))
    );
    assert_eq!(
        writer.variable_attribute("CT", "units").unwrap(),
        Some(AttrValue::from("degree Celsius"))
    );
    assert_eq!(
        writer.variable_attribute("buoyancy_change", "units").unwrap(),
        Some(AttrValue::from("cc"))
    );

    let read = writer.get("heading", &["lat"]).unwrap();
    assert_eq!(read, vec![result.t.clone(), result.heading.clone(), result.lat.clone()]);
}

#[test]
fn test_model_results_length_mismatch_writes_nothing() {
    let mut writer = memory_writer();
    let mut result = model_result(5);
    result.density.pop();

    let outcome = GliderFlightSerializer::new(&mut writer).write_model_results(&result);
    assert!(matches!(
        outcome,
        Err(SerializerError::Dataset(DatasetError::LengthMismatch { .. }))
    ));
    assert!(writer.variable_names().unwrap().is_empty());
}

#[test]
fn test_model_output_table() {
    assert_eq!(MODEL_OUTPUTS.len(), 15);
    let names: Vec<&str> = MODEL_OUTPUTS.iter().map(|o| o.name).collect();
    assert_eq!(
        names.join(" "),
        "u w U alpha pitch ww heading depth lat lon density SA CT pot_density buoyancy_change"
    );
}

// ==================== Thermal Lag Tests ====================

#[test]
fn test_thermal_lag_coefs() {
    let mut writer = memory_writer();
    let coefficients = ThermalLagCoefficients::from([0.02, 0.5, 12.0]);

    GliderFlightSerializer::new(&mut writer)
        .write_thermal_lag_coefs(&coefficients)
        .unwrap();

    assert_eq!(
        writer.variable_names().unwrap(),
        vec![
            "thermal_lag_coefs/alpha",
            "thermal_lag_coefs/beta",
            "thermal_lag_coefs/tau",
        ]
    );
    assert_eq!(
        writer
            .variable_attribute("thermal_lag_coefs/alpha", "units")
            .unwrap(),
        Some(AttrValue::from("-"))
    );
    assert_eq!(
        writer
            .variable_attribute("thermal_lag_coefs/tau", "units")
            .unwrap(),
        Some(AttrValue::from("s"))
    );
    assert_eq!(
        writer.storage().values("thermal_lag_coefs/tau").unwrap(),
        vec![12.0]
    );
}

#[test]
fn test_model_result_json_names() {
    let json = serde_json::to_value(model_result(1)).unwrap();
    assert!(json.get("U").is_some());
    assert!(json.get("SA").is_some());
    assert!(json.get("CT").is_some());
    assert!(json.get("speed").is_none());
}
