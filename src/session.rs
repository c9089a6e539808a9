//! The validate → lookup → compute sequence, with explicit carry-over of
//! the previous result between views.

use serde::{Deserialize, Serialize};

use crate::calc::{DerivedMetrics, FormInput, SizingModel, ValidationErrors};
use crate::location::LookupIndex;

/// Last submitted input together with the metrics computed from it.
///
/// Passed back in by the caller on the next invocation instead of living in
/// any process-wide store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The coerced form the metrics were computed from.
    pub input: FormInput,
    /// Constants in effect when the metrics were computed.
    pub model: SizingModel,
    /// The computed metrics.
    pub metrics: DerivedMetrics,
}

impl Snapshot {
    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a snapshot previously written by [`Snapshot::to_json`].
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Runs estimates against a loaded index.
///
/// Holding a `&LookupIndex` makes "table loaded" a precondition the type
/// system enforces.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    index: &'a LookupIndex,
    model: SizingModel,
}

impl<'a> Estimator<'a> {
    /// Creates an estimator over `index` with the given constants.
    pub fn new(index: &'a LookupIndex, model: SizingModel) -> Self {
        Self { index, model }
    }

    /// The constants in use.
    pub fn model(&self) -> &SizingModel {
        &self.model
    }

    /// Validates `input` and computes its metrics.
    ///
    /// When `prior` holds the same input and was computed with the same
    /// constants, its metrics are reused. A lookup miss is not an error:
    /// irradiance-dependent metrics come back unavailable.
    ///
    /// # Arguments
    ///
    /// * `input` - Coerced form values
    /// * `prior` - Result of the previous submission, if the caller kept one
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if the input fails validation; nothing
    /// is computed in that case.
    pub fn estimate(
        &self,
        input: FormInput,
        prior: Option<&Snapshot>,
    ) -> Result<Snapshot, ValidationErrors> {
        input.validate()?;

        if let Some(prior) = prior {
            if prior.input == input && prior.model == self.model {
                tracing::debug!("reusing metrics from prior snapshot");
                return Ok(prior.clone());
            }
        }

        let record = self.index.lookup(&input.region, &input.locality);
        if record.is_none() {
            tracing::warn!(
                region = %input.region,
                locality = %input.locality,
                "no location record; irradiance-dependent metrics unavailable"
            );
        }
        let metrics = DerivedMetrics::compute(&input, record, &self.model);
        Ok(Snapshot {
            input,
            model: self.model,
            metrics,
        })
    }
}
