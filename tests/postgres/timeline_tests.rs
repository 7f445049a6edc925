//! Interview timeline repository behaviour against `PostgreSQL`.

use super::helpers::{BoxError, SEEKER_A, SEEKER_B, test_database};
use chrono::NaiveDate;
use recruitflow::performance::{
    adapters::postgres::PostgresInterviewTimelineRepository,
    domain::NewInterviewTimeline,
    ports::InterviewTimelineRepository,
};
use recruitflow::pipeline::{
    domain::JobSeekerId,
    ports::PipelineRepositoryError,
};
use rstest::rstest;

fn timeline(job_seeker_id: JobSeekerId, first: Option<NaiveDate>) -> NewInterviewTimeline {
    NewInterviewTimeline {
        job_seeker_id,
        first_interview_date: first,
        interview_date: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timelines_are_returned_in_store_order() -> Result<(), BoxError> {
    let Some(db) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresInterviewTimelineRepository::new(db.pool.clone());
    let march_fifth = NaiveDate::from_ymd_opt(2024, 3, 5).ok_or("bad date")?;
    let april_first = NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("bad date")?;

    let earlier = repository.store(timeline(SEEKER_A, Some(march_fifth))).await?;
    let later = repository.store(timeline(SEEKER_A, Some(april_first))).await?;
    repository.store(timeline(SEEKER_B, None)).await?;

    let found = repository.find_by_job_seekers(&[SEEKER_A]).await?;

    assert_eq!(found, vec![earlier.clone(), later.clone()]);
    assert!(earlier.id < later.id);
    assert_eq!(found.last().and_then(|t| t.effective_date()), Some(april_first));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_seeker_list_returns_nothing() -> Result<(), BoxError> {
    let Some(db) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresInterviewTimelineRepository::new(db.pool.clone());
    repository.store(timeline(SEEKER_A, None)).await?;

    assert!(repository.find_by_job_seekers(&[]).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_seeker_is_a_constraint_violation() -> Result<(), BoxError> {
    let Some(db) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresInterviewTimelineRepository::new(db.pool.clone());

    let result = repository.store(timeline(JobSeekerId::new(999), None)).await;

    assert!(matches!(
        result,
        Err(PipelineRepositoryError::ConstraintViolation { .. })
    ));
    Ok(())
}
