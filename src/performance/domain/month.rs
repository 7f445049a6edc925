//! Calendar months used as reporting buckets.

use super::PerformanceDomainError;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month in the reporting calendar.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    /// Creates a month from a year and a month number in `1..=12`.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceDomainError::InvalidMonth`] when the pair does not
    /// name a representable month.
    pub fn new(year: i32, month: u32) -> Result<Self, PerformanceDomainError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::containing)
            .ok_or(PerformanceDomainError::InvalidMonth { year, month })
    }

    /// Returns the month containing a calendar date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the month containing an instant as seen at `offset`.
    #[must_use]
    pub fn at_offset(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::containing(instant.with_timezone(&offset).date_naive())
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month number in `1..=12`.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the following month.
    #[must_use]
    pub const fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Iterates months from `self` through `last`, inclusive.
    ///
    /// Yields nothing when `last` precedes `self`.
    pub fn through(self, last: Self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self), |current| Some(current.succ()))
            .take_while(move |month| *month <= last)
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
