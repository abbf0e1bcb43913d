use super::*;
use crate::attributes::AttrValue;
use crate::schema::{CFDATASET_MIMETYPE, HEADER_ENTRY};
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;

fn time_depth_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.create_dimension("T", DimensionLength::Unlimited).unwrap();
    store.create_dimension("Z", DimensionLength::Fixed(3)).unwrap();
    store
}

// ==================== Memory Store Tests ====================

#[test]
fn test_scalar_takes_exactly_one_value() {
    let mut store = MemoryStore::new();
    store.create_variable("mass", DataType::Float32, &[]).unwrap();

    assert!(matches!(
        store.put_values("mass", &[1.0, 2.0]),
        Err(StorageError::ShapeMismatch { .. })
    ));

    store.put_values("mass", &[60.5]).unwrap();
    assert_eq!(store.values("mass").unwrap(), vec![60.5]);
    assert_eq!(store.variable("mass").unwrap().unwrap().rank(), 0);
}

#[test]
fn test_int_payload_truncates_or_rejects() {
    let mut store = time_depth_store();
    store.create_variable("flags", DataType::Int32, &["T"]).unwrap();

    store.put_values("flags", &[60.5, -1.5, 2.0]).unwrap();
    assert_eq!(store.values("flags").unwrap(), vec![60.0, -1.0, 2.0]);

    for bad in [1e10, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            store.put_values("flags", &[0.0, bad]),
            Err(StorageError::ValueOutOfRange { dtype: DataType::Int32, .. })
        ));
    }
    // Rejected payloads leave the previous one and the axis untouched
    assert_eq!(store.values("flags").unwrap(), vec![60.0, -1.0, 2.0]);
    assert_eq!(store.dimension("T").unwrap().unwrap().current_length, 3);
}

#[test]
fn test_unlimited_dimension_grows() {
    let mut store = time_depth_store();
    store.create_variable("time", DataType::Float64, &["T"]).unwrap();
    store.put_values("time", &[0.0, 1.0, 2.0, 3.0]).unwrap();

    let dim = store.dimension("T").unwrap().unwrap();
    assert_eq!(dim.current_length, 4);

    store.create_variable("short", DataType::Float64, &["T"]).unwrap();
    store.put_values("short", &[1.0, 2.0]).unwrap();
    // Never shrinks
    assert_eq!(store.dimension("T").unwrap().unwrap().current_length, 4);
}

#[test]
fn test_two_dimensional_payload_must_fill_records() {
    let mut store = time_depth_store();
    store
        .create_variable("u", DataType::Float64, &["T", "Z"])
        .unwrap();

    let result = store.put_values("u", &[1.0, 2.0, 3.0, 4.0]);
    assert!(matches!(result, Err(StorageError::ShapeMismatch { .. })));

    store.put_values("u", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(store.variable("u").unwrap().unwrap().shape, vec![2, 3]);
}

#[test]
fn test_fixed_only_payload_length() {
    let mut store = time_depth_store();
    store.create_variable("z", DataType::Float64, &["Z"]).unwrap();
    assert!(matches!(
        store.put_values("z", &[1.0, 2.0]),
        Err(StorageError::ShapeMismatch { .. })
    ));
    store.put_values("z", &[1.0, 2.0, 3.0]).unwrap();
}

#[test]
fn test_duplicate_and_unknown_names() {
    let mut store = time_depth_store();
    assert!(matches!(
        store.create_dimension("T", DimensionLength::Unlimited),
        Err(StorageError::DuplicateDimension(_))
    ));

    store.create_variable("a", DataType::Float64, &["T"]).unwrap();
    assert!(matches!(
        store.create_variable("a", DataType::Float64, &["T"]),
        Err(StorageError::DuplicateVariable(_))
    ));
    assert!(matches!(
        store.create_variable("b", DataType::Float64, &["X"]),
        Err(StorageError::UnknownDimension(_))
    ));
    assert!(matches!(
        store.put_values("missing", &[1.0]),
        Err(StorageError::UnknownVariable(_))
    ));
    assert!(matches!(
        store.put_attribute(AttributeTarget::Variable("missing"), "units", "m".into()),
        Err(StorageError::UnknownVariable(_))
    ));
}

#[test]
fn test_multiple_unlimited_rejected() {
    let mut store = time_depth_store();
    store
        .create_dimension("Tgf", DimensionLength::Unlimited)
        .unwrap();
    assert!(matches!(
        store.create_variable("bad", DataType::Float64, &["T", "Tgf"]),
        Err(StorageError::MultipleUnlimited(_))
    ));
}

#[test]
fn test_dtype_cast_on_write() {
    let mut store = MemoryStore::new();
    store.create_variable("f", DataType::Float32, &[]).unwrap();
    store.create_variable("i", DataType::Int32, &[]).unwrap();
    store.put_values("f", &[0.1]).unwrap();
    store.put_values("i", &[2.6]).unwrap();

    assert_eq!(store.values("f").unwrap(), vec![0.1f32 as f64]);
    assert_eq!(store.values("i").unwrap(), vec![3.0]);
}

#[test]
fn test_attributes_global_and_variable() {
    let mut store = time_depth_store();
    store
        .put_attribute(AttributeTarget::Global, "title", "test".into())
        .unwrap();
    store.create_variable("z", DataType::Float64, &["Z"]).unwrap();
    store
        .put_attribute(AttributeTarget::Variable("z"), "units", "m".into())
        .unwrap();

    assert_eq!(
        store.attribute(AttributeTarget::Global, "title").unwrap(),
        Some(AttrValue::from("test"))
    );
    assert_eq!(
        store
            .attributes(AttributeTarget::Variable("z"))
            .unwrap()
            .get("units"),
        Some(&AttrValue::from("m"))
    );
    assert_eq!(store.attribute(AttributeTarget::Global, "nope").unwrap(), None);
}

#[test]
fn test_use_after_close() {
    let mut store = time_depth_store();
    store.create_variable("z", DataType::Float64, &["Z"]).unwrap();
    store.close().unwrap();

    assert!(store.is_closed());
    assert!(!store.is_writable());
    assert!(matches!(store.values("z"), Err(StorageError::Closed)));
    assert!(matches!(
        store.create_dimension("X", DimensionLength::Fixed(1)),
        Err(StorageError::Closed)
    ));
    assert!(matches!(store.close(), Err(StorageError::Closed)));
}

// ==================== Container Store Tests ====================

#[test]
fn test_container_mimetype_first_entry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.cfz");

    let mut store = ContainerStore::create(&path).unwrap();
    store.close().unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let mut first = archive.by_index(0).unwrap();
    assert_eq!(first.name(), "mimetype");
    assert_eq!(first.compression(), zip::CompressionMethod::Stored);
    let mut content = String::new();
    first.read_to_string(&mut content).unwrap();
    assert_eq!(content, CFDATASET_MIMETYPE);
    drop(first);

    assert!(archive.by_name(HEADER_ENTRY).is_ok());
}

#[test]
fn test_container_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.cfz");

    let mut store = ContainerStore::create(&path).unwrap();
    store.create_dimension("T", DimensionLength::Unlimited).unwrap();
    store.create_dimension("Z", DimensionLength::Fixed(2)).unwrap();
    store.create_variable("time", DataType::Float64, &["T"]).unwrap();
    store
        .create_variable("u", DataType::Float64, &["T", "Z"])
        .unwrap();
    store.create_variable("mass", DataType::Float32, &[]).unwrap();
    store.create_variable("empty", DataType::Float64, &["T"]).unwrap();
    store
        .put_attribute(AttributeTarget::Global, "num_sensors", AttrValue::Int(4))
        .unwrap();
    store
        .put_attribute(AttributeTarget::Variable("u"), "units", "m/s".into())
        .unwrap();
    store.put_values("time", &[0.0, 1.0, 2.0]).unwrap();
    store
        .put_values("u", &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6])
        .unwrap();
    store.put_values("mass", &[60.5]).unwrap();
    let bytes = store.close().unwrap();
    assert!(bytes > 0);

    let reader = ContainerStore::open(&path).unwrap();
    assert!(!reader.is_writable());
    assert_eq!(reader.values("time").unwrap(), vec![0.0, 1.0, 2.0]);
    assert_eq!(
        reader.values("u").unwrap(),
        vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]
    );
    assert_eq!(reader.values("mass").unwrap(), vec![60.5]);
    assert!(reader.values("empty").unwrap().is_empty());
    assert_eq!(reader.variable("u").unwrap().unwrap().shape, vec![3, 2]);
    assert_eq!(
        reader.attribute(AttributeTarget::Global, "num_sensors").unwrap(),
        Some(AttrValue::Int(4))
    );
    assert_eq!(
        reader.dimension("Z").unwrap().unwrap().length,
        DimensionLength::Fixed(2)
    );
    assert_eq!(
        reader.variable_names().unwrap(),
        vec!["time", "u", "mass", "empty"]
    );
}

#[test]
fn test_container_read_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ro.cfz");
    ContainerStore::create(&path).unwrap().close().unwrap();

    let mut reader = ContainerStore::open(&path).unwrap();
    assert!(matches!(
        reader.create_dimension("T", DimensionLength::Unlimited),
        Err(StorageError::ReadOnly)
    ));
    reader.close().unwrap();
    assert!(matches!(reader.dimensions(), Err(StorageError::Closed)));
}

#[test]
fn test_container_missing_parent_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("file.cfz");
    assert!(matches!(
        ContainerStore::create(&path),
        Err(StorageError::IoError(_))
    ));
}

#[test]
fn test_container_no_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.cfz");
    ContainerStore::create(&path).unwrap().close().unwrap();

    let config = StoreConfig {
        overwrite: false,
        ..StoreConfig::default()
    };
    assert!(matches!(
        ContainerStore::create_with_config(&path, config),
        Err(StorageError::AlreadyExists(_))
    ));
}

#[test]
fn test_open_rejects_foreign_zip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("foreign.zip");

    let file = File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("mimetype", zip::write::SimpleFileOptions::default())
        .unwrap();
    std::io::Write::write_all(&mut zip, b"application/zip").unwrap();
    zip.finish().unwrap();

    assert!(matches!(
        ContainerStore::open(&path),
        Err(StorageError::InvalidFormat(_))
    ));
}

#[test]
fn test_compression_presets_roundtrip() {
    for config in [StoreConfig::fast(), StoreConfig::max_compression()] {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preset.cfz");

        let mut store = ContainerStore::create_with_config(&path, config).unwrap();
        store.create_dimension("T", DimensionLength::Unlimited).unwrap();
        store.create_variable("time", DataType::Float64, &["T"]).unwrap();
        let values: Vec<f64> = (0..1000).map(|i| i as f64 * 0.5).collect();
        store.put_values("time", &values).unwrap();
        store.close().unwrap();

        let reader = ContainerStore::open(&path).unwrap();
        assert_eq!(reader.values("time").unwrap(), values);
    }
}
