//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::calc::{FieldIssue, RawForm};
use crate::roi::{RoiSeries, RoiSummary};
use crate::session::Snapshot;

/// Body of `POST /estimate`.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// The form as entered.
    pub form: RawForm,
    /// Result of the previous submission, if the caller kept one.
    #[serde(default)]
    pub prior: Option<Snapshot>,
}

/// Body of `GET /roi`.
#[derive(Debug, Serialize)]
pub struct RoiResponse {
    /// Headline figures.
    pub summary: RoiSummary,
    /// The underlying series, for charting.
    pub series: RoiSeries,
}

/// Error response body for 4xx/5xx answers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Offending fields, for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

impl ErrorResponse {
    /// Creates an error body with no field issues.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            issues: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_request_without_prior() {
        let req: EstimateRequest = serde_json::from_str(
            r#"{"form":{"bills":["1","2","3"],"region":"Cauca","locality":"Popayán","coverage":"50"}}"#,
        )
        .unwrap();
        assert!(req.prior.is_none());
        assert_eq!(req.form.bills[2], "3");
        assert_eq!(req.form.stratum, "");
    }

    #[test]
    fn error_response_omits_empty_issues() {
        let json = serde_json::to_value(ErrorResponse::new("not found")).unwrap();
        assert_eq!(json["error"], "not found");
        assert!(json.get("issues").is_none());
    }
}
