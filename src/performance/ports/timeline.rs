//! Repository port for interview timelines.

use crate::performance::domain::{InterviewTimeline, NewInterviewTimeline};
use crate::pipeline::domain::JobSeekerId;
use crate::pipeline::ports::PipelineRepositoryResult;
use async_trait::async_trait;

/// Interview timeline persistence contract.
///
/// Failures use the pipeline repository error type; both stores live in
/// the same database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterviewTimelineRepository: Send + Sync {
    /// Stores a timeline and returns it with its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::pipeline::ports::PipelineRepositoryError::ConstraintViolation`]
    /// when the store rejects the record.
    async fn store(&self, timeline: NewInterviewTimeline)
    -> PipelineRepositoryResult<InterviewTimeline>;

    /// Returns every timeline of the given job seekers.
    ///
    /// An empty slice returns an empty list without querying.
    async fn find_by_job_seekers(
        &self,
        job_seeker_ids: &[JobSeekerId],
    ) -> PipelineRepositoryResult<Vec<InterviewTimeline>>;
}
