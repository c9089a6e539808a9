//! Loading of the location lookup table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::record::{LocationRecord, composite_key};
use crate::error::{LoadError, json_kind};

const RESOURCE: &str = "location table";

/// The raw lookup table: composite key → record.
///
/// A duplicated key in the source document keeps the last value seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationTable {
    entries: BTreeMap<String, LocationRecord>,
}

/// One department of the older city catalog.
#[derive(Debug, Deserialize)]
struct CatalogDepartment {
    #[serde(default)]
    departamento: String,
    #[serde(default)]
    ciudades: Vec<String>,
}

impl LocationTable {
    /// Reads and parses a location table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// errors of [`LocationTable::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses a location table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for invalid JSON and
    /// [`LoadError::FormatMismatch`] when the document is not an object of
    /// objects (a top-level array in particular).
    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| LoadError::Parse {
            resource: RESOURCE,
            source,
        })?;
        Self::from_value(value)
    }

    /// Builds a table from an already-parsed JSON document.
    ///
    /// # Errors
    ///
    /// See [`LocationTable::from_json_str`].
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(map) = value else {
            return Err(LoadError::mismatch(
                RESOURCE,
                "an object keyed by \"region|locality\"",
                json_kind(&value),
            ));
        };

        let mut entries = BTreeMap::new();
        for (key, raw_record) in map {
            if !raw_record.is_object() {
                return Err(LoadError::mismatch(
                    RESOURCE,
                    format!("an object at key \"{key}\""),
                    json_kind(&raw_record),
                ));
            }
            let record = LocationRecord::deserialize(raw_record).map_err(|e| {
                LoadError::mismatch(
                    RESOURCE,
                    format!("a location record at key \"{key}\""),
                    e.to_string(),
                )
            })?;
            entries.insert(key, record);
        }
        Ok(Self { entries })
    }

    /// Parses the older catalog shape: an array of
    /// `{"departamento": ..., "ciudades": [...]}` objects.
    ///
    /// The resulting records carry names only (no coordinates, no `hsp`).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for invalid JSON and
    /// [`LoadError::FormatMismatch`] when the document is not such an array.
    pub fn from_catalog_json(raw: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| LoadError::Parse {
            resource: "city catalog",
            source,
        })?;
        if !value.is_array() {
            return Err(LoadError::mismatch(
                "city catalog",
                "an array of departments",
                json_kind(&value),
            ));
        }
        let departments = Vec::<CatalogDepartment>::deserialize(value)
            .map_err(|e| LoadError::mismatch("city catalog", "an array of departments", e.to_string()))?;

        let mut entries = BTreeMap::new();
        for dep in departments {
            for city in dep.ciudades {
                let record = LocationRecord {
                    region: Some(dep.departamento.trim().to_string()),
                    locality: Some(city.trim().to_string()),
                    ..LocationRecord::default()
                };
                entries.insert(composite_key(&dep.departamento, &city), record);
            }
        }
        Ok(Self { entries })
    }

    /// Inserts or replaces a record under `key`.
    pub fn insert(&mut self, key: impl Into<String>, record: LocationRecord) {
        self.entries.insert(key.into(), record);
    }

    /// Iterates `(key, record)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocationRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> BTreeMap<String, LocationRecord> {
        self.entries
    }
}

impl FromIterator<(String, LocationRecord)> for LocationTable {
    fn from_iter<I: IntoIterator<Item = (String, LocationRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
