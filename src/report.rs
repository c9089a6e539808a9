//! Plain-text rendering of estimates and ROI summaries.

use std::fmt;

use crate::calc::DerivedMetrics;
use crate::roi::RoiSummary;

/// Shown in place of any metric that could not be computed.
pub const UNAVAILABLE: &str = "unavailable";

/// Formats an amount as Colombian pesos: `$ 1.234.567`, no decimals.
///
/// # Returns
///
/// The rounded amount with `.` thousands separators; negatives get a
/// leading `-`, non-finite values render as `$ 0`.
pub fn format_cop(value: f64) -> String {
    let value = if value.is_finite() { value.round() } else { 0.0 };
    let digits = format!("{:.0}", value.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if value < 0.0 {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Formats an optional number with `decimals` places and a unit suffix.
fn optional(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$} {unit}"),
        _ => UNAVAILABLE.to_string(),
    }
}

impl fmt::Display for DerivedMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Estimate ---")?;
        writeln!(f, "Bills total:        {}", format_cop(self.sum_bills))?;
        writeln!(f, "Average bill:       {}", format_cop(self.avg_bill))?;
        writeln!(f, "Daily consumption:  {:.2}", self.daily_consumption)?;
        writeln!(
            f,
            "Peak power:         {}",
            optional(self.peak_power_kwp, 2, "kWp")
        )?;
        writeln!(
            f,
            "Annual yield:       {}",
            optional(self.annual_yield_kwh, 0, "kWh/yr")
        )?;
        writeln!(f, "Budget estimate:    {}", format_cop(self.budget_estimate))?;
        write!(
            f,
            "Peak sun hours:     {}",
            optional(self.hsp, 2, "kWh/m²/day")
        )?;
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            write!(f, "\nCoordinates:        {lat:.4}, {lon:.4}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RoiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Return on Investment ---")?;
        match self.payback_year {
            Some(year) => writeln!(f, "Payback:            year {year}")?,
            None => writeln!(f, "Payback:            not within the horizon")?,
        }
        writeln!(f, "10-year ROI:        {}", optional(self.roi_10y_pct, 1, "%"))?;
        writeln!(f, "Investment:         {}", format_cop(self.capex))?;
        let savings = self
            .first_year_savings
            .map_or_else(|| UNAVAILABLE.to_string(), format_cop);
        write!(f, "First-year savings: {savings}")
    }
}
