//! TOML-based configuration: data locations and the sizing constants.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::calc::{SizingModel, SystemLosses, YieldModel};

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`SizingConfig::from_toml_file`] or use [`SizingConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizingConfig {
    /// Where the static JSON resources live.
    #[serde(default)]
    pub data: DataConfig,
    /// Loss sub-efficiencies.
    #[serde(default)]
    pub losses: LossesConfig,
    /// Annual-yield constants.
    #[serde(default, rename = "yield")]
    pub annual_yield: YieldConfig,
}

/// Paths of the static JSON resources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Location lookup table.
    pub locations: PathBuf,
    /// ROI time series.
    pub roi: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            locations: PathBuf::from("data/locations.json"),
            roi: PathBuf::from("data/roi.json"),
        }
    }
}

/// Loss sub-efficiencies, each in (0, 1].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LossesConfig {
    /// Cabling efficiency.
    pub wiring: f64,
    /// Inverter efficiency.
    pub inverter: f64,
    /// Soiling and temperature derate.
    pub derate: f64,
}

impl Default for LossesConfig {
    fn default() -> Self {
        let l = SystemLosses::default();
        Self {
            wiring: l.wiring,
            inverter: l.inverter,
            derate: l.derate,
        }
    }
}

/// Annual-yield constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YieldConfig {
    /// Year-normalisation factor (> 0).
    pub days_per_year: f64,
    /// Performance ratio in (0, 1].
    pub performance_ratio: f64,
}

impl Default for YieldConfig {
    fn default() -> Self {
        let y = YieldModel::default();
        Self {
            days_per_year: y.days_per_year,
            performance_ratio: y.performance_ratio,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"losses.inverter"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SizingConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// The calculator constants described by this configuration.
    pub fn model(&self) -> SizingModel {
        SizingModel {
            losses: SystemLosses {
                wiring: self.losses.wiring,
                inverter: self.losses.inverter,
                derate: self.losses.derate,
            },
            annual_yield: YieldModel {
                days_per_year: self.annual_yield.days_per_year,
                performance_ratio: self.annual_yield.performance_ratio,
            },
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let unit_fields = [
            ("losses.wiring", self.losses.wiring),
            ("losses.inverter", self.losses.inverter),
            ("losses.derate", self.losses.derate),
            ("yield.performance_ratio", self.annual_yield.performance_ratio),
        ];
        for (field, value) in unit_fields {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in (0.0, 1.0]".into(),
                });
            }
        }

        let days = self.annual_yield.days_per_year;
        if !days.is_finite() || days <= 0.0 {
            errors.push(ConfigError {
                field: "yield.days_per_year".into(),
                message: "must be a finite number > 0".into(),
            });
        }

        if self.data.locations.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "data.locations".into(),
                message: "must not be empty".into(),
            });
        }
        if self.data.roi.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "data.roi".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}
