//! `PostgreSQL` repository implementation for interview timelines.

use super::schema::interview_timelines;
use crate::performance::{
    domain::{InterviewTimeline, NewInterviewTimeline},
    ports::InterviewTimelineRepository,
};
use crate::pipeline::{
    adapters::postgres::{PipelinePgPool, classify, run_blocking},
    domain::{InterviewTimelineId, JobSeekerId},
    ports::PipelineRepositoryResult,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interview_timelines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct InterviewTimelineRow {
    id: i64,
    job_seeker_id: i64,
    first_interview_date: Option<NaiveDate>,
    interview_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = interview_timelines)]
struct NewInterviewTimelineRow {
    job_seeker_id: i64,
    first_interview_date: Option<NaiveDate>,
    interview_date: Option<NaiveDate>,
}

impl From<InterviewTimelineRow> for InterviewTimeline {
    fn from(row: InterviewTimelineRow) -> Self {
        Self {
            id: InterviewTimelineId::new(row.id),
            job_seeker_id: JobSeekerId::new(row.job_seeker_id),
            first_interview_date: row.first_interview_date,
            interview_date: row.interview_date,
        }
    }
}

/// `PostgreSQL`-backed interview timeline repository.
#[derive(Debug, Clone)]
pub struct PostgresInterviewTimelineRepository {
    pool: PipelinePgPool,
}

impl PostgresInterviewTimelineRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PipelinePgPool) -> Self {
        Self { pool }
    }

}

#[async_trait]
impl InterviewTimelineRepository for PostgresInterviewTimelineRepository {
    async fn store(
        &self,
        timeline: NewInterviewTimeline,
    ) -> PipelineRepositoryResult<InterviewTimeline> {
        const OP: &str = "store_interview_timeline";
        let new_row = NewInterviewTimelineRow {
            job_seeker_id: timeline.job_seeker_id.value(),
            first_interview_date: timeline.first_interview_date,
            interview_date: timeline.interview_date,
        };
        run_blocking(&self.pool, OP, move |connection| {
            diesel::insert_into(interview_timelines::table)
                .values(&new_row)
                .returning(InterviewTimelineRow::as_returning())
                .get_result::<InterviewTimelineRow>(connection)
                .map(InterviewTimeline::from)
                .map_err(classify(OP))
        })
        .await
    }

    async fn find_by_job_seekers(
        &self,
        job_seeker_ids: &[JobSeekerId],
    ) -> PipelineRepositoryResult<Vec<InterviewTimeline>> {
        const OP: &str = "find_interview_timelines";
        if job_seeker_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = job_seeker_ids.iter().map(|id| id.value()).collect();
        run_blocking(&self.pool, OP, move |connection| {
            let rows = interview_timelines::table
                .filter(interview_timelines::job_seeker_id.eq_any(raw_ids))
                .order(interview_timelines::id.asc())
                .select(InterviewTimelineRow::as_select())
                .load::<InterviewTimelineRow>(connection)
                .map_err(classify(OP))?;
            Ok(rows.into_iter().map(InterviewTimeline::from).collect())
        })
        .await
    }
}
