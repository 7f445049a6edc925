//! `PostgreSQL` adapters for performance reporting.

mod repository;
mod schema;

pub use repository::PostgresInterviewTimelineRepository;
