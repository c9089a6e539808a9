//! Form input: coercion of raw text and validation before computing.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{BILL_COUNT, COVERAGE_RANGE};

/// Valid socioeconomic stratum codes.
const STRATUM_RANGE: std::ops::RangeInclusive<u8> = 1..=6;

/// The form exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawForm {
    /// Three monthly bills, as text.
    pub bills: [String; BILL_COUNT],
    /// Selected region.
    pub region: String,
    /// Selected locality.
    pub locality: String,
    /// Stratum code, as text.
    pub stratum: String,
    /// Coverage percentage, as text.
    pub coverage: String,
    /// Battery choice (`"si"`, `"no"`, ...).
    pub battery: String,
    /// Contact name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Free-text comments.
    pub comments: String,
}

/// Free-text contact fields; carried through, never computed on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Contact name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email; checked for an `@` when given.
    pub email: String,
    /// Free-text comments.
    pub comments: String,
}

/// A coerced snapshot of the form at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    /// Three monthly bills, each >= 0.
    pub bills: [f64; BILL_COUNT],
    /// Selected region, trimmed.
    pub region: String,
    /// Selected locality, trimmed.
    pub locality: String,
    /// Stratum code 1..=6, `None` when missing or out of range.
    pub stratum: Option<u8>,
    /// Coverage percentage; validated, never clamped.
    pub coverage_pct: f64,
    /// Whether battery storage is requested.
    pub include_battery: bool,
    #[serde(default)]
    pub contact: Contact,
}

impl FormInput {
    /// Coerces a raw form into typed input.
    ///
    /// Malformed numbers become 0 and negative bills become 0. Nothing
    /// here fails; [`FormInput::validate`] decides whether the result is
    /// acceptable.
    ///
    /// # Arguments
    ///
    /// * `raw` - The form exactly as entered
    pub fn from_raw(raw: &RawForm) -> Self {
        Self {
            bills: raw.bills.each_ref().map(|b| coerce_number(b).max(0.0)),
            region: raw.region.trim().to_string(),
            locality: raw.locality.trim().to_string(),
            stratum: raw
                .stratum
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|s| STRATUM_RANGE.contains(s)),
            coverage_pct: coerce_number(&raw.coverage),
            include_battery: parse_flag(&raw.battery),
            contact: Contact {
                name: raw.name.trim().to_string(),
                phone: raw.phone.trim().to_string(),
                email: raw.email.trim().to_string(),
                comments: raw.comments.trim().to_string(),
            },
        }
    }

    /// Checks every field and reports all problems at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each offending field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut issues = Vec::new();

        for (i, bill) in self.bills.iter().enumerate() {
            if *bill <= 0.0 {
                issues.push(FieldIssue::new(format!("bill{}", i + 1), "must be > 0"));
            }
        }
        if self.region.is_empty() {
            issues.push(FieldIssue::new("region", "is required"));
        }
        if self.locality.is_empty() {
            issues.push(FieldIssue::new("locality", "is required"));
        }
        if self.stratum.is_none() {
            issues.push(FieldIssue::new("stratum", "must be a whole number from 1 to 6"));
        }
        if !COVERAGE_RANGE.contains(&self.coverage_pct) {
            issues.push(FieldIssue::new(
                "coverage",
                format!(
                    "must be between {} and {} %",
                    COVERAGE_RANGE.start(),
                    COVERAGE_RANGE.end()
                ),
            ));
        }
        let email = &self.contact.email;
        if !email.is_empty() && !email.contains('@') {
            issues.push(FieldIssue::new("email", "is not a valid address"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { issues })
        }
    }
}

/// Parses a number leniently: trimmed, and 0 for anything unparsable or
/// non-finite.
pub fn coerce_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "si" | "sí" | "yes" | "true" | "1" | "on"
    )
}

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    /// Field name as used in the form.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All validation problems of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    /// One entry per offending field, in check order.
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    /// Names of the offending fields, in check order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|i| i.field.as_str())
    }

    /// Whether `field` is among the offending fields.
    pub fn has(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "please correct the highlighted fields: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}
