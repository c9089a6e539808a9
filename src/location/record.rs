//! One row of the location lookup table.

use serde::{Deserialize, Serialize};

/// Separator between region and locality in a composite key.
pub const KEY_SEPARATOR: char = '|';

/// A municipality with its coordinates and peak-sun-hours constant.
///
/// Field names follow the JSON produced by the data pipeline
/// (`departamento`, `municipio`, `lat`, `lon`, `hsp`). Every field is
/// optional: the names may be back-derived from the composite key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Region (department) name.
    #[serde(rename = "departamento", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Locality (municipality) name.
    #[serde(rename = "municipio", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Peak solar hours (kWh/m²/day).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsp: Option<f64>,
    /// Reason the pipeline could not obtain `hsp`, when it failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_hsp: Option<String>,
}

impl LocationRecord {
    /// Creates a record with names and an irradiance constant.
    pub fn new(region: &str, locality: &str, hsp: Option<f64>) -> Self {
        Self {
            region: Some(region.to_string()),
            locality: Some(locality.to_string()),
            hsp,
            ..Self::default()
        }
    }

    /// Returns the irradiance constant if it is usable for sizing.
    ///
    /// Only positive finite values qualify.
    pub fn usable_hsp(&self) -> Option<f64> {
        self.hsp.filter(|h| h.is_finite() && *h > 0.0)
    }

    /// Derives `(region, locality)` from the record's own fields, falling
    /// back to the composite key for whichever is missing or blank.
    ///
    /// Both names are trimmed; either may come back empty.
    pub fn names<'a>(&'a self, key: &'a str) -> (&'a str, &'a str) {
        let (key_region, key_locality) = split_key(key);
        let region = non_blank(self.region.as_deref()).unwrap_or(key_region);
        let locality = non_blank(self.locality.as_deref()).unwrap_or(key_locality);
        (region, locality)
    }
}

/// Joins a region and locality into a composite key, trimming both.
pub fn composite_key(region: &str, locality: &str) -> String {
    format!("{}{KEY_SEPARATOR}{}", region.trim(), locality.trim())
}

/// Splits a composite key on the first separator; the locality part is
/// empty when the key carries no separator.
pub fn split_key(key: &str) -> (&str, &str) {
    match key.split_once(KEY_SEPARATOR) {
        Some((region, locality)) => (region.trim(), locality.trim()),
        None => (key.trim(), ""),
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
