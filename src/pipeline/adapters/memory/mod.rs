//! In-memory adapters for pipeline persistence.

mod pipeline;

pub use pipeline::InMemoryPipelineRepository;
