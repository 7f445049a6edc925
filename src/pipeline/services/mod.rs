//! Application services for the recruitment pipeline.

mod lifecycle;
mod queries;

pub use lifecycle::{
    PipelineService, PipelineServiceError, PipelineServiceResult, StartCandidacyRequest,
    TaskRequest,
};
pub use queries::PipelineQueryService;
