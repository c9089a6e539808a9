//! Randomised checks over seeded tables and bills.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use solar_sizer::calc::{DerivedMetrics, FormInput, SizingModel};
use solar_sizer::location::collate;
use solar_sizer::location::record::split_key;
use solar_sizer::location::{LocationRecord, LocationTable, LookupIndex, composite_key};

const NAMES: &[&str] = &[
    "Antioquia", "Ábrego", "abejorral", "Atlántico", "Bogotá", "Boyacá", "Nariño", "Ñátaga",
    "Nuquí", "Ocaña", "Zipaquirá", "Cali", "cali", "Bolívar", "Bolivar", "", "  ", " Tunja ",
];

fn pick(rng: &mut StdRng) -> &'static str {
    NAMES[rng.random_range(0..NAMES.len())]
}

fn random_names(rng: &mut StdRng) -> LocationRecord {
    LocationRecord {
        region: rng.random_bool(0.5).then(|| pick(rng).to_string()),
        locality: rng.random_bool(0.5).then(|| pick(rng).to_string()),
        ..LocationRecord::default()
    }
}

/// Random tables mixing canonical keys, key-only records, records with
/// foreign names, and disambiguated keys (`"R|L (R)"`) that list under an
/// existing `(R, L)` pair.
fn random_table(rng: &mut StdRng) -> LocationTable {
    let n = rng.random_range(0..40);
    (0..n)
        .map(|_| {
            let region = pick(rng);
            let locality = pick(rng);
            let (key, mut record) = match rng.random_range(0..10) {
                0 => (region.to_string(), random_names(rng)),
                1..=3 => (
                    format!("{region}|{locality} ({region})"),
                    LocationRecord::new(region, locality, None),
                ),
                4..=5 => (
                    format!("{region}|{locality}"),
                    LocationRecord::new(region, locality, None),
                ),
                _ => (format!("{region}|{locality}"), random_names(rng)),
            };
            record.hsp = rng.random_bool(0.7).then(|| rng.random_range(-1.0..7.0));
            (key, record)
        })
        .collect()
}

fn strictly_sorted(names: &[String]) -> bool {
    names
        .windows(2)
        .all(|w| collate::compare(&w[0], &w[1]) == Ordering::Less)
}

#[test]
fn lists_are_sorted_and_unique_for_any_table() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let index = LookupIndex::build(random_table(&mut rng));
        assert!(strictly_sorted(index.regions()), "{:?}", index.regions());
        for region in index.regions() {
            assert!(!region.is_empty());
            let localities = index.localities(region);
            assert!(!localities.is_empty());
            assert!(strictly_sorted(localities), "{localities:?}");
        }
    }
}

#[test]
fn listed_localities_resolve_to_their_region() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let table = random_table(&mut rng);
        let keys: Vec<String> = table.iter().map(|(k, _)| k.to_string()).collect();
        let index = LookupIndex::build(table);
        for region in index.regions() {
            for locality in index.localities(region) {
                let record = index
                    .lookup(region, locality)
                    .unwrap_or_else(|| panic!("{region}|{locality} should resolve"));
                let source_key = keys
                    .iter()
                    .find(|k| index.get(k).is_some_and(|r| std::ptr::eq(r, record)))
                    .expect("record comes from the table");
                assert_eq!(record.names(source_key).0, region.as_str());
            }
        }
    }
}

#[test]
fn every_source_key_returns_its_record() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut checked = 0;
    for _ in 0..200 {
        let table = random_table(&mut rng);
        let copy = table.clone();
        let index = LookupIndex::build(table);
        for (key, record) in copy.iter() {
            assert_eq!(index.get(key), Some(record));

            let (region, locality) = split_key(key);
            let canonical = composite_key(region, locality) == key;
            if !canonical || region.is_empty() || locality.is_empty() {
                continue;
            }
            if record.names(key) != (region, locality) {
                continue;
            }
            let stored = index.get(key).expect("key is in the index");
            let found = index
                .lookup(region, locality)
                .unwrap_or_else(|| panic!("{key} should resolve"));
            assert!(std::ptr::eq(found, stored), "{key} resolved to {found:?}");
            checked += 1;
        }
    }
    assert!(checked > 100, "only {checked} keys exercised");
}

fn input(bills: [f64; 3]) -> FormInput {
    FormInput {
        bills,
        coverage_pct: 50.0,
        ..FormInput::default()
    }
}

#[test]
fn sum_of_bills_is_monotonic_in_each_bill() {
    let mut rng = StdRng::seed_from_u64(3);
    let model = SizingModel::default();
    for _ in 0..500 {
        let bills: [f64; 3] = std::array::from_fn(|_| rng.random_range(0.0..1e7));
        let base = DerivedMetrics::compute(&input(bills), None, &model).sum_bills;
        for i in 0..3 {
            let mut bumped = bills;
            bumped[i] += rng.random_range(0.0..1e6);
            let more = DerivedMetrics::compute(&input(bumped), None, &model).sum_bills;
            assert!(more >= base, "bill {i}: {more} < {base}");
        }
    }
}

#[test]
fn irradiance_dependent_metrics_follow_hsp() {
    let mut rng = StdRng::seed_from_u64(11);
    let model = SizingModel::default();
    for _ in 0..500 {
        let bills: [f64; 3] = std::array::from_fn(|_| rng.random_range(0.0..1e7));
        let hsp: f64 = rng.random_range(-5.0..8.0);
        let record = LocationRecord::new("R", "L", Some(hsp));
        let m = DerivedMetrics::compute(&input(bills), Some(&record), &model);
        if hsp > 0.0 {
            assert!(m.peak_power_kwp.is_some_and(f64::is_finite), "hsp {hsp}");
            assert!(m.annual_yield_kwh.is_some_and(f64::is_finite), "hsp {hsp}");
        } else {
            assert_eq!(m.peak_power_kwp, None);
            assert_eq!(m.annual_yield_kwh, None);
        }
        assert!(m.budget_estimate.is_finite());
    }
}
