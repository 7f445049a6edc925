//! In-memory interview timeline repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::performance::{
    domain::{InterviewTimeline, NewInterviewTimeline},
    ports::InterviewTimelineRepository,
};
use crate::pipeline::{
    domain::{InterviewTimelineId, JobSeekerId},
    ports::{PipelineRepositoryError, PipelineRepositoryResult},
};

/// Thread-safe in-memory interview timeline repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInterviewTimelineRepository {
    state: Arc<RwLock<Vec<InterviewTimeline>>>,
}

impl InMemoryInterviewTimelineRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(operation: &'static str, err: impl std::fmt::Display) -> PipelineRepositoryError {
    PipelineRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InterviewTimelineRepository for InMemoryInterviewTimelineRepository {
    async fn store(
        &self,
        timeline: NewInterviewTimeline,
    ) -> PipelineRepositoryResult<InterviewTimeline> {
        let mut state = self.state.write().map_err(|err| poisoned("store", err))?;
        let next_id = state
            .iter()
            .map(|stored| stored.id.value())
            .max()
            .unwrap_or_default()
            + 1;
        let stored = InterviewTimeline {
            id: InterviewTimelineId::new(next_id),
            job_seeker_id: timeline.job_seeker_id,
            first_interview_date: timeline.first_interview_date,
            interview_date: timeline.interview_date,
        };
        state.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_job_seekers(
        &self,
        job_seeker_ids: &[JobSeekerId],
    ) -> PipelineRepositoryResult<Vec<InterviewTimeline>> {
        if job_seeker_ids.is_empty() {
            return Ok(Vec::new());
        }
        let state = self
            .state
            .read()
            .map_err(|err| poisoned("find_by_job_seekers", err))?;
        Ok(state
            .iter()
            .filter(|timeline| job_seeker_ids.contains(&timeline.job_seeker_id))
            .cloned()
            .collect())
    }
}
