//! Solar-system sizing: location lookup, bill-based sizing metrics, and
//! ten-year ROI figures.

#[cfg(feature = "api")]
pub mod api;
pub mod calc;
pub mod config;
pub mod error;
/// CSV export.
pub mod io;
pub mod location;
pub mod logging;
/// Plain-text rendering of results.
pub mod report;
pub mod roi;
pub mod session;
