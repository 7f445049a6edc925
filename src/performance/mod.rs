//! Performance reporting.
//!
//! KPI counts are derived on demand from the task log of the pipeline
//! context. Rows are attributed either to the month they were recorded in or
//! to the job seeker's interview month, taken from interview timelines.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
