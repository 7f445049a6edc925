//! Recruitflow: recruitment pipeline tracking for staffing agencies.
//!
//! A candidacy pairs one job seeker with one job posting. Each candidacy
//! owns an append-only log of phase tasks; its current state is always the
//! most recent task. Performance KPIs are recomputed from that log on
//! demand.
//!
//! # Architecture
//!
//! Recruitflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`pipeline`]: Task groups, phase tasks, and pipeline state resolution
//! - [`performance`]: Monthly KPI counts on activity or interview months
//! - [`config`]: Runtime rules shared by both contexts

pub mod config;
pub mod performance;
pub mod pipeline;
