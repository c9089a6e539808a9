/// CSV export of estimates and ROI series.
pub mod export;
