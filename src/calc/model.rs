//! Loss and yield constants used by the sizing formula.
//!
//! Kept apart from the formula itself so the loss model can be tuned
//! without touching the calculator.

use serde::{Deserialize, Serialize};

/// Days in the billing month assumed when converting bills to daily figures.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Number of bills averaged per estimate.
pub const BILL_COUNT: usize = 3;

/// Inclusive bounds of the coverage percentage.
pub const COVERAGE_RANGE: std::ops::RangeInclusive<f64> = 10.0..=100.0;

/// Sub-efficiencies whose product is the system loss factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemLosses {
    /// Cabling efficiency.
    pub wiring: f64,
    /// Inverter efficiency.
    pub inverter: f64,
    /// Soiling and temperature derate.
    pub derate: f64,
}

impl SystemLosses {
    /// Product of the sub-efficiencies, in (0, 1] for a valid model.
    pub fn factor(&self) -> f64 {
        self.wiring * self.inverter * self.derate
    }
}

impl Default for SystemLosses {
    fn default() -> Self {
        Self {
            wiring: 0.97,
            inverter: 0.96,
            derate: 0.85,
        }
    }
}

/// Annual-yield normalisation constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldModel {
    /// Year-normalisation factor applied to the daily yield.
    pub days_per_year: f64,
    /// Derating applied to the annual yield.
    pub performance_ratio: f64,
}

impl Default for YieldModel {
    fn default() -> Self {
        Self {
            days_per_year: 365.0,
            performance_ratio: 0.80,
        }
    }
}

/// The full set of constants the calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizingModel {
    /// Loss model for peak-power sizing.
    pub losses: SystemLosses,
    /// Annual-yield constants.
    pub annual_yield: YieldModel,
}
