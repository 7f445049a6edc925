//! `PostgreSQL` adapters for pipeline persistence.

mod blocking_helpers;
mod models;
mod repository;
mod schema;

pub use blocking_helpers::PipelinePgPool;
pub(crate) use blocking_helpers::run_blocking;
pub(crate) use repository::classify;
pub use repository::PostgresPipelineRepository;
