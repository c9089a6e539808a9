//! Form coercion, validation, and the sizing calculator.

pub mod input;
pub mod metrics;
/// Loss and yield constants.
pub mod model;

pub use input::{Contact, FieldIssue, FormInput, RawForm, ValidationErrors};
pub use metrics::DerivedMetrics;
pub use model::{SizingModel, SystemLosses, YieldModel};
