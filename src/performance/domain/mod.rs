//! Domain model for performance reporting.
//!
//! Nothing here is stored. Every count is recomputed from task histories and
//! interview timelines.

mod counting;
mod error;
mod kpi;
mod month;
mod report;
mod scope;
mod timeline;

pub use counting::{KpiTally, MonthAttribution, TimeBasis, qualifying_tasks, tally};
pub use error::PerformanceDomainError;
pub use kpi::{CounterDefinition, Kpi, PhaseMatcher};
pub use month::ReportingMonth;
pub use report::PerformanceReport;
pub use scope::{PerformanceScope, PerformanceSubject};
pub use timeline::{InterviewTimeline, NewInterviewTimeline, interview_dates};
