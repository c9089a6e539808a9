//! ROI view: load the sample series, summarise, render, export.

mod common;

use solar_sizer::io::export::{export_roi_csv, write_roi_csv};
use solar_sizer::roi::RoiSeries;

fn sample_series() -> RoiSeries {
    RoiSeries::from_path(&common::data_path("roi.json")).expect("sample series should load")
}

#[test]
fn sample_series_summary() {
    let summary = sample_series().summary();
    assert_eq!(summary.payback_year, Some(8));
    assert_eq!(summary.capex, 18_000_000.0);
    assert_eq!(summary.first_year_savings, Some(2_400_000.0));
    let roi = summary.roi_10y_pct.unwrap();
    assert!((roi - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn sample_series_renders_in_pesos() {
    let text = sample_series().summary().to_string();
    assert!(text.contains("Payback:            year 8"));
    assert!(text.contains("10-year ROI:        33.3 %"));
    assert!(text.contains("Investment:         $ 18.000.000"));
    assert!(text.contains("First-year savings: $ 2.400.000"));
}

#[test]
fn series_exports_one_row_per_year() {
    let series = sample_series();
    let mut buf = Vec::new();
    write_roi_csv(&series, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[1], "0,-18000000.00,-18000000.00");
    assert_eq!(lines[11], "10,2400000.00,6000000.00");
}

#[test]
fn export_to_path_writes_file() {
    let path = std::env::temp_dir().join(format!("solar-sizer-roi-{}.csv", std::process::id()));
    export_roi_csv(&sample_series(), &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(written.starts_with("year,cashflow,cumulative"));
}

#[test]
fn missing_series_is_an_io_error() {
    let err = RoiSeries::from_path(&common::data_path("absent.json")).unwrap_err();
    assert!(!err.is_format_mismatch());
}
