//! Recruitment pipeline state machine.
//!
//! A candidacy (one job seeker against one posting) is a task group owning an
//! append-only log of phase transitions. The current pipeline position is
//! always derived from that log. The module follows hexagonal architecture:
//!
//! - Domain types and pure resolution rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
