//! CSV export of estimates and ROI series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::DerivedMetrics;
use crate::roi::RoiSeries;

/// Column header for ROI series export.
const ROI_HEADER: &str = "year,cashflow,cumulative";

/// Column header for metrics export.
const METRICS_HEADER: &str = "sum_bills,avg_bill,daily_consumption,peak_power_kwp,\
                              annual_yield_kwh,budget_estimate,hsp,lat,lon";

/// Exports an ROI series to a CSV file at the given path.
///
/// # Arguments
///
/// * `series` - Loaded ROI series
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_roi_csv(series: &RoiSeries, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_roi_csv(series, io::BufWriter::new(file))
}

/// Writes an ROI series as CSV to any writer: one row per year.
///
/// # Arguments
///
/// * `series` - Loaded ROI series
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_roi_csv(series: &RoiSeries, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(ROI_HEADER.split(','))?;

    for ((year, cashflow), cumulative) in series
        .years
        .iter()
        .zip(&series.cashflow)
        .zip(&series.cumulative)
    {
        wtr.write_record(&[
            year.to_string(),
            format!("{cashflow:.2}"),
            format!("{cumulative:.2}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports derived metrics to a CSV file at the given path.
///
/// # Arguments
///
/// * `metrics` - Result of one estimate
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_metrics_csv(metrics: &DerivedMetrics, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_metrics_csv(metrics, io::BufWriter::new(file))
}

/// Writes derived metrics as a header and a single CSV row.
///
/// Unavailable metrics are written as empty cells.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_metrics_csv(metrics: &DerivedMetrics, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(METRICS_HEADER.split(',').map(str::trim))?;

    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    wtr.write_record(&[
        metrics.sum_bills.to_string(),
        metrics.avg_bill.to_string(),
        metrics.daily_consumption.to_string(),
        opt(metrics.peak_power_kwp),
        opt(metrics.annual_yield_kwh),
        metrics.budget_estimate.to_string(),
        opt(metrics.hsp),
        opt(metrics.lat),
        opt(metrics.lon),
    ])?;

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> RoiSeries {
        RoiSeries {
            investment: -100.0,
            years: vec![0, 1, 2],
            cashflow: vec![-100.0, 60.0, 60.0],
            cumulative: vec![-100.0, -40.0, 20.0],
        }
    }

    fn metrics(peak: Option<f64>) -> DerivedMetrics {
        DerivedMetrics {
            sum_bills: 330_000.0,
            avg_bill: 110_000.0,
            daily_consumption: 3_666.5,
            peak_power_kwp: peak,
            annual_yield_kwh: peak.map(|p| p * 1_000.0),
            budget_estimate: 11_000.0,
            hsp: peak.map(|_| 4.5),
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn roi_header_and_row_count() {
        let mut buf = Vec::new();
        write_roi_csv(&series(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "year,cashflow,cumulative");
        assert_eq!(lines[3], "2,60.00,20.00");
    }

    #[test]
    fn metrics_unavailable_cells_are_empty() {
        let mut buf = Vec::new();
        write_metrics_csv(&metrics(None), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(9));

        let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "330000");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[0][5], "11000");
    }

    #[test]
    fn metrics_available_cells_parse_as_numbers() {
        let mut buf = Vec::new();
        write_metrics_csv(&metrics(Some(5.5)), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let row = rdr.records().next().and_then(Result::ok);
        let peak: Option<f64> = row.as_ref().and_then(|r| r[3].parse().ok());
        assert_eq!(peak, Some(5.5));
    }

    #[test]
    fn deterministic_output() {
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_roi_csv(&series(), &mut buf1).ok();
        write_roi_csv(&series(), &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
