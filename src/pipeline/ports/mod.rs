//! Port contracts for the recruitment pipeline.
//!
//! Ports define infrastructure-agnostic interfaces used by pipeline services.

pub mod repository;

#[cfg(test)]
pub use repository::MockPipelineRepository;
pub use repository::{
    EntryScope, OwnedHistory, PipelineRepository, PipelineRepositoryError,
    PipelineRepositoryResult,
};
