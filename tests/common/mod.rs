//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use solar_sizer::calc::RawForm;
use solar_sizer::config::SizingConfig;
use solar_sizer::location::{LocationTable, LookupIndex};

/// Path of a file under the crate's `data/` directory.
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Configuration pointing at the bundled sample data.
pub fn sample_config() -> SizingConfig {
    let mut cfg = SizingConfig::default();
    cfg.data.locations = data_path("locations.json");
    cfg.data.roi = data_path("roi.json");
    cfg
}

/// The bundled sample location table.
pub fn sample_table() -> LocationTable {
    LocationTable::from_path(&data_path("locations.json")).expect("sample table should load")
}

/// Index over the bundled sample table.
pub fn sample_index() -> LookupIndex {
    LookupIndex::build(sample_table())
}

/// A valid form for Medellín with bills 100 000 / 120 000 / 110 000 and 50 %
/// coverage.
pub fn medellin_form() -> RawForm {
    RawForm {
        bills: ["100000".into(), "120000".into(), "110000".into()],
        region: "Antioquia".into(),
        locality: "Medellín".into(),
        stratum: "4".into(),
        coverage: "50".into(),
        battery: "no".into(),
        name: "Ana Pérez".into(),
        email: "ana@example.com".into(),
        ..RawForm::default()
    }
}
