//! KPI counts computed from candidacies recorded through the services.

use super::helpers::{
    CA_AGENT, CA_STAFF, Harness, POSTING_X, POSTING_Y, RA_AGENT, SEEKER_A, SEEKER_B, at_step,
    harness, ts,
};
use chrono::NaiveDate;
use recruitflow::performance::{
    domain::{Kpi, NewInterviewTimeline, PerformanceScope, ReportingMonth, TimeBasis},
    ports::InterviewTimelineRepository,
};
use recruitflow::pipeline::domain::{JobSeekerId, PhaseCategory, StaffType, step};
use rstest::rstest;

fn month(year: i32, number: u32) -> eyre::Result<ReportingMonth> {
    Ok(ReportingMonth::new(year, number)?)
}

async fn interview_on(harness: &Harness, seeker: JobSeekerId, date: &str) -> eyre::Result<()> {
    harness
        .timelines
        .store(NewInterviewTimeline {
            job_seeker_id: seeker,
            first_interview_date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d")?),
            interview_date: None,
        })
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offer_moves_between_months_with_the_time_basis(harness: Harness) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    harness
        .record(
            group_id,
            at_step(PhaseCategory::Offer, step::offer::OFFERED),
            ts("2024-02-20T03:00:00Z"),
        )
        .await?;
    interview_on(&harness, SEEKER_A, "2024-03-05").await?;
    let scope = PerformanceScope::agent(CA_AGENT, StaffType::Ca);

    let activity_feb = harness
        .reports
        .count(scope, TimeBasis::ActivityMonth, month(2024, 2)?, Kpi::Offer)
        .await?;
    let interview_mar = harness
        .reports
        .count(scope, TimeBasis::InterviewMonth, month(2024, 3)?, Kpi::Offer)
        .await?;
    let interview_feb = harness
        .reports
        .count(scope, TimeBasis::InterviewMonth, month(2024, 2)?, Kpi::Offer)
        .await?;

    eyre::ensure!(activity_feb == 1, "activity February count was {activity_feb}");
    eyre::ensure!(interview_mar == 1, "interview March count was {interview_mar}");
    eyre::ensure!(interview_feb == 0, "interview February count was {interview_feb}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activity_months_use_the_reporting_offset(harness: Harness) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    harness
        .record(
            group_id,
            at_step(PhaseCategory::FinalSelection, step::selection::SCHEDULED),
            ts("2024-01-31T16:00:00Z"),
        )
        .await?;
    let scope = PerformanceScope::staff(CA_STAFF, StaffType::Ca);

    let series = harness
        .reports
        .monthly_series(scope, TimeBasis::ActivityMonth, month(2024, 1)?, month(2024, 2)?)
        .await?;
    let counts: Vec<u64> = series
        .iter()
        .map(|report| report.count(Kpi::FinalSelection))
        .collect();

    eyre::ensure!(counts == vec![0, 1], "unexpected final selection series {counts:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recommendation_completion_requires_consent(harness: Harness) -> eyre::Result<()> {
    let consented = harness.start(SEEKER_A, POSTING_X).await?;
    let skipped = harness.start(SEEKER_B, POSTING_Y).await?;
    let consent = at_step(PhaseCategory::Recommendation, step::recommendation::SEEKER_CONSENT);
    let recommended = at_step(PhaseCategory::Recommendation, step::recommendation::RECOMMENDED);
    harness.record(consented, consent, ts("2024-03-01T01:00:00Z")).await?;
    harness.record(consented, recommended, ts("2024-03-02T01:00:00Z")).await?;
    harness.record(consented, recommended, ts("2024-03-03T01:00:00Z")).await?;
    harness.record(skipped, recommended, ts("2024-03-02T01:00:00Z")).await?;

    let report = harness
        .reports
        .monthly_report(
            PerformanceScope::agent(RA_AGENT, StaffType::Ra),
            TimeBasis::ActivityMonth,
            month(2024, 3)?,
        )
        .await?;

    eyre::ensure!(
        report.count(Kpi::RecommendationCompletion) == 1,
        "expected one completed recommendation, got {}",
        report.count(Kpi::RecommendationCompletion)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn introductions_count_in_the_month_they_were_opened(harness: Harness) -> eyre::Result<()> {
    harness.start(SEEKER_A, POSTING_X).await?;
    harness.start(SEEKER_B, POSTING_X).await?;

    let count = harness
        .reports
        .count(
            PerformanceScope::agent(CA_AGENT, StaffType::Ca),
            TimeBasis::ActivityMonth,
            month(2024, 1)?,
            Kpi::JobIntroduction,
        )
        .await?;

    eyre::ensure!(count == 2, "expected two introductions, got {count}");
    Ok(())
}
