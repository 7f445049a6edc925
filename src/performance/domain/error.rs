//! Error types for performance reporting inputs.

use super::ReportingMonth;
use thiserror::Error;

/// Errors returned while constructing reporting inputs.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PerformanceDomainError {
    /// The month number is outside `1..=12` or the year is unrepresentable.
    #[error("invalid reporting month {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month number.
        month: u32,
    },

    /// A series was requested with its end before its start.
    #[error("reporting range ends ({to}) before it starts ({from})")]
    InvertedRange {
        /// First month of the range.
        from: ReportingMonth,
        /// Last month of the range.
        to: ReportingMonth,
    },
}
