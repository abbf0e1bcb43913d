//! Write a single latitude series to `example.cfz` and read it back.
//!
//! Run with `RUST_LOG=debug cargo run --example example` to see the dataset
//! being assembled.

use anyhow::Result;
use cfdataset::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let metadata = GlobalMetadata::template()
        .with_title("example")
        .with_source("example.rs")
        .with_extra("description", "Example description");

    let path = format!("example.{}", CFDATASET_EXTENSION);
    let mut dataset = DatasetWriter::create(&path, &metadata)?;

    let t: Vec<f64> = (0..100).map(f64::from).collect();
    let lat: Vec<f64> = (0..100).map(|i| 54.0 + f64::from(i) / 99.0).collect();
    dataset.add_time_series("latitude", "degree north", &t, &lat, ParameterOptions::default())?;

    let stats = dataset.close()?;
    println!("{}", stats);

    let reader = DatasetWriter::open_read(&path)?;
    let series = reader.get("latitude", &[])?;
    println!(
        "latitude: {} samples, {:.3} .. {:.3}",
        series[1].len(),
        series[1].first().copied().unwrap_or_default(),
        series[1].last().copied().unwrap_or_default()
    );

    Ok(())
}
