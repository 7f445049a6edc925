//! Application services for performance reporting.

mod reporting;

pub use reporting::{PerformanceError, PerformanceResult, PerformanceService};
