//! Derived sizing metrics.

use serde::{Deserialize, Serialize};

use super::input::FormInput;
use super::model::{BILL_COUNT, DAYS_PER_MONTH, SizingModel};
use crate::location::LocationRecord;

/// Output of the calculator.
///
/// Irradiance-dependent fields are `None` ("unavailable") whenever no
/// positive irradiance constant was available; they are never defaulted.
/// No rounding is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Sum of the three bills.
    pub sum_bills: f64,
    /// Average bill.
    pub avg_bill: f64,
    /// Estimated daily consumption (`avg_bill / 30`).
    pub daily_consumption: f64,
    /// Required peak power (kWp).
    pub peak_power_kwp: Option<f64>,
    /// Estimated annual energy yield (kWh/yr).
    pub annual_yield_kwh: Option<f64>,
    /// Budget estimate (`sum_bills / 30`).
    pub budget_estimate: f64,
    /// Irradiance constant used, if any.
    pub hsp: Option<f64>,
    /// Latitude of the matched location.
    pub lat: Option<f64>,
    /// Longitude of the matched location.
    pub lon: Option<f64>,
}

impl DerivedMetrics {
    /// Computes all metrics for `input`, using `record` for irradiance.
    ///
    /// Never fails: missing or unusable irradiance only marks the
    /// dependent fields unavailable.
    ///
    /// # Arguments
    ///
    /// * `input` - Coerced form values; expected to have passed validation
    /// * `record` - Matched location, if any
    /// * `model` - Loss and yield constants
    pub fn compute(
        input: &FormInput,
        record: Option<&LocationRecord>,
        model: &SizingModel,
    ) -> Self {
        let sum_bills: f64 = input.bills.iter().sum();
        let avg_bill = sum_bills / BILL_COUNT as f64;
        let daily_consumption = avg_bill / DAYS_PER_MONTH;

        let hsp = record.and_then(LocationRecord::usable_hsp);
        let peak_power_kwp =
            hsp.and_then(|h| peak_power(input.coverage_pct, daily_consumption, h, model));
        let annual_yield_kwh = match (hsp, peak_power_kwp) {
            (Some(h), Some(p)) => finite(
                h * p * model.annual_yield.days_per_year * model.annual_yield.performance_ratio,
            ),
            _ => None,
        };

        Self {
            sum_bills,
            avg_bill,
            daily_consumption,
            peak_power_kwp,
            annual_yield_kwh,
            budget_estimate: sum_bills / DAYS_PER_MONTH,
            hsp,
            lat: record.and_then(|r| r.lat),
            lon: record.and_then(|r| r.lon),
        }
    }
}

/// `(coverage × daily) / (loss_factor × 100 × hsp)`.
fn peak_power(coverage_pct: f64, daily: f64, hsp: f64, model: &SizingModel) -> Option<f64> {
    let loss_factor = model.losses.factor();
    if loss_factor.is_nan() || loss_factor <= 0.0 {
        return None;
    }
    finite((coverage_pct * daily) / (loss_factor * 100.0 * hsp))
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}
