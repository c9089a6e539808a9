//! Ten-year return-on-investment series and its summary figures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LoadError, json_kind};

const RESOURCE: &str = "roi series";

/// Year whose cumulative value defines the headline ROI.
pub const ROI_HORIZON_YEAR: i64 = 10;

/// Yearly cash flows of an installation.
///
/// `years`, `cashflow` and `cumulative` are parallel; year 0 is the
/// initial outlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiSeries {
    /// Initial investment (sign is ignored when dividing).
    pub investment: f64,
    /// Year numbers, ascending.
    pub years: Vec<i64>,
    /// Per-year net cash flow.
    pub cashflow: Vec<f64>,
    /// Running total of `cashflow`.
    pub cumulative: Vec<f64>,
}

/// Headline figures derived from a [`RoiSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiSummary {
    /// First year whose cumulative value is >= 0; `None` if never.
    pub payback_year: Option<i64>,
    /// Cumulative value at year 10 over |investment|, in percent.
    pub roi_10y_pct: Option<f64>,
    /// |investment|.
    pub capex: f64,
    /// Cash flow of year 1.
    pub first_year_savings: Option<f64>,
}

impl RoiSeries {
    /// Reads and parses a series from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// errors of [`RoiSeries::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses a series from JSON text. Missing fields default to zero / empty.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for invalid JSON and
    /// [`LoadError::FormatMismatch`] when the document is not an object,
    /// a field has the wrong type, or the sequences differ in length.
    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| LoadError::Parse {
            resource: RESOURCE,
            source,
        })?;
        if !value.is_object() {
            return Err(LoadError::mismatch(RESOURCE, "an object", json_kind(&value)));
        }
        let series = Self::deserialize(value)
            .map_err(|e| LoadError::mismatch(RESOURCE, "a valid series", e.to_string()))?;
        series.check_lengths()?;
        Ok(series)
    }

    fn check_lengths(&self) -> Result<(), LoadError> {
        let n = self.years.len();
        if self.cashflow.len() != n || self.cumulative.len() != n {
            return Err(LoadError::mismatch(
                RESOURCE,
                "parallel sequences of equal length",
                format!(
                    "years={}, cashflow={}, cumulative={}",
                    n,
                    self.cashflow.len(),
                    self.cumulative.len()
                ),
            ));
        }
        Ok(())
    }

    fn position(&self, year: i64) -> Option<usize> {
        self.years.iter().position(|y| *y == year)
    }

    /// First year whose cumulative value is >= 0.
    pub fn payback_year(&self) -> Option<i64> {
        self.cumulative
            .iter()
            .zip(&self.years)
            .find(|(c, _)| **c >= 0.0)
            .map(|(_, y)| *y)
    }

    /// ROI at the ten-year horizon, in percent.
    ///
    /// `None` when year 10 is absent or the investment is zero.
    pub fn roi_10y_pct(&self) -> Option<f64> {
        let capex = self.investment.abs();
        if capex == 0.0 {
            return None;
        }
        let idx = self.position(ROI_HORIZON_YEAR)?;
        self.cumulative.get(idx).map(|c| c / capex * 100.0)
    }

    /// Cash flow of year 1, if present.
    pub fn first_year_savings(&self) -> Option<f64> {
        self.position(1).and_then(|i| self.cashflow.get(i).copied())
    }

    /// Computes all summary figures.
    pub fn summary(&self) -> RoiSummary {
        RoiSummary {
            payback_year: self.payback_year(),
            roi_10y_pct: self.roi_10y_pct(),
            capex: self.investment.abs(),
            first_year_savings: self.first_year_savings(),
        }
    }
}
