//! Region / locality index over a [`LocationTable`].

use std::collections::{BTreeMap, HashMap};

use super::collate;
use super::record::{LocationRecord, composite_key};
use super::table::LocationTable;

/// Sorted region and locality lists plus a composite-key record accessor.
///
/// Built once per table load and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    regions: Vec<String>,
    localities: HashMap<String, Vec<String>>,
    records: BTreeMap<String, LocationRecord>,
    /// Composite key built from each record's own names → source key.
    by_names: HashMap<String, String>,
}

impl LookupIndex {
    /// Builds the index from a table.
    ///
    /// Entries whose derived region or locality is empty are skipped; an
    /// empty table yields an empty index.
    ///
    /// # Arguments
    ///
    /// * `table` - Loaded lookup table, consumed
    ///
    /// # Returns
    ///
    /// An index whose region and locality lists are sorted and
    /// deduplicated.
    pub fn build(table: LocationTable) -> Self {
        let records = table.into_entries();
        let mut by_region: HashMap<String, Vec<String>> = HashMap::new();
        let mut by_names = HashMap::new();
        let mut skipped = 0_usize;

        for (key, record) in &records {
            let (region, locality) = record.names(key);
            if region.is_empty() || locality.is_empty() {
                tracing::debug!(key = %key, "skipping location without region or locality");
                skipped += 1;
                continue;
            }
            by_region
                .entry(region.to_string())
                .or_default()
                .push(locality.to_string());

            by_names.insert(composite_key(region, locality), key.clone());
        }

        let mut regions: Vec<String> = by_region.keys().cloned().collect();
        collate::sort_dedup(&mut regions);
        for list in by_region.values_mut() {
            collate::sort_dedup(list);
        }

        tracing::debug!(
            entries = records.len(),
            regions = regions.len(),
            skipped,
            "built location index"
        );

        Self {
            regions,
            localities: by_region,
            records,
            by_names,
        }
    }

    /// All regions in collation order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Localities of `region` in collation order; empty for an unknown
    /// region. The region must match exactly (after trimming).
    pub fn localities(&self, region: &str) -> &[String] {
        self.localities
            .get(region.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `region` is present in the index.
    pub fn has_region(&self, region: &str) -> bool {
        self.localities.contains_key(region.trim())
    }

    /// Looks up the record for an exact `(region, locality)` pair.
    ///
    /// The record stored under the composite key wins when it is listed
    /// under that same pair. Otherwise the pair is matched against the names
    /// other records are listed under, and finally against the raw key. No
    /// case or accent folding is applied. A miss returns `None`.
    ///
    /// # Arguments
    ///
    /// * `region` - Region name, trimmed before matching
    /// * `locality` - Locality name, trimmed before matching
    pub fn lookup(&self, region: &str, locality: &str) -> Option<&LocationRecord> {
        let key = composite_key(region, locality);
        let exact = self.records.get(&key);
        if let Some(record) = exact {
            if record.names(&key) == (region.trim(), locality.trim()) {
                return Some(record);
            }
        }
        self.by_names
            .get(&key)
            .and_then(|source| self.records.get(source))
            .or(exact)
    }

    /// Returns the record stored under a raw composite key from the table.
    pub fn get(&self, key: &str) -> Option<&LocationRecord> {
        self.records.get(key)
    }

    /// Number of records held (including ones not listed under a region).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<LocationTable> for LookupIndex {
    fn from(table: LocationTable) -> Self {
        Self::build(table)
    }
}
