//! In-memory adapters for performance reporting.

mod timeline;

pub use timeline::InMemoryInterviewTimelineRepository;
