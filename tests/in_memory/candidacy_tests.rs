//! Candidacy creation, task log growth, and latest-task edits.

use super::helpers::{
    Harness, POSTING_X, POSTING_Y, SEEKER_A, SEEKER_B, at_step, ca_task, harness, introduced,
    ts,
};
use chrono::NaiveDate;
use recruitflow::config::PipelineConfig;
use recruitflow::pipeline::{
    domain::{
        ExternalPosting, Phase, PhaseCategory, PipelineDomainError, StaffType, TaskDetails,
        TaskId, TerminalReason, step,
    },
    ports::PipelineRepositoryError,
    services::{PipelineServiceError, StartCandidacyRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_log_is_append_only_and_ordered(harness: Harness) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    let consent = at_step(PhaseCategory::Recommendation, step::recommendation::SEEKER_CONSENT);
    let recommended = at_step(PhaseCategory::Recommendation, step::recommendation::RECOMMENDED);
    harness.record(group_id, consent, ts("2024-01-11T00:00:00Z")).await?;
    let last = harness
        .record(group_id, recommended, ts("2024-01-12T00:00:00Z"))
        .await?;

    let history = harness.queries.history(group_id).await?;
    let phases: Vec<_> = history.tasks().map(|task| task.phase()).collect();

    eyre::ensure!(
        phases == vec![introduced(), consent, recommended],
        "unexpected log order {phases:?}"
    );
    eyre::ensure!(history.current_state().id() == last, "current state is not the last append");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pairing_lookup_finds_the_single_group(harness: Harness) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    harness.start(SEEKER_A, POSTING_Y).await?;

    let found = harness.queries.find_group_for_pair(SEEKER_A, POSTING_X).await?;
    let missing = harness.queries.find_group_for_pair(SEEKER_B, POSTING_X).await?;

    eyre::ensure!(found.map(|group| group.id()) == Some(group_id), "pair lookup mismatch");
    eyre::ensure!(missing.is_none(), "unexpected group for an unpaired seeker");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn candidacy_flags_are_stored_with_the_group(harness: Harness) -> eyre::Result<()> {
    let history = harness
        .lifecycle
        .start_candidacy(
            StartCandidacyRequest::new(SEEKER_B, POSTING_Y, ca_task(introduced()))
                .double_sided()
                .self_application()
                .with_external(ExternalPosting {
                    company_name: "Harbour Logistics".to_owned(),
                    job_title: "Warehouse planner".to_owned(),
                }),
        )
        .await?;

    let stored = harness
        .queries
        .groups_by_ids(&[history.group().id()])
        .await?;
    let group = stored.first().ok_or_else(|| eyre::eyre!("group not found"))?;

    eyre::ensure!(group.is_double_sided(), "double-sided flag lost");
    eyre::ensure!(group.is_self_application(), "self-application flag lost");
    eyre::ensure!(
        group.external().map(|posting| posting.job_title.as_str()) == Some("Warehouse planner"),
        "external posting lost"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_apply_to_the_latest_task_only(harness: Harness) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    let first = harness.queries.current_state(group_id).await?;
    let latest = harness
        .record(
            group_id,
            at_step(PhaseCategory::JobIntroduction, step::introduction::SEEKER_INTERESTED),
            ts("2024-01-11T00:00:00Z"),
        )
        .await?;

    let stale = harness
        .lifecycle
        .update_latest_task(first.id(), TaskDetails::default().with_remarks("too late"))
        .await;
    harness
        .lifecycle
        .update_latest_task(latest, TaskDetails::default().with_guidance("prepare CV"))
        .await?;
    let tasks = harness.queries.tasks_by_ids(&[first.id(), latest]).await?;

    eyre::ensure!(
        matches!(
            stale,
            Err(PipelineServiceError::Domain(PipelineDomainError::NotLatestTask { .. }))
        ),
        "expected NotLatestTask, got {stale:?}"
    );
    eyre::ensure!(
        tasks.iter().map(|task| task.details().guidance.as_str()).collect::<Vec<_>>()
            == vec!["", "prepare CV"],
        "edit landed on the wrong task"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_an_unknown_task_is_not_found(harness: Harness) -> eyre::Result<()> {
    let result = harness
        .lifecycle
        .update_latest_task(
            TaskId::new(999),
            TaskDetails::default(),
        )
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(PipelineServiceError::Repository(PipelineRepositoryError::NotFound { .. }))
        ),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_metadata_changes_bump_updated_at(harness: Harness) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    let joining = NaiveDate::from_ymd_opt(2024, 6, 1);
    harness.clock.set(ts("2024-02-01T00:00:00Z"));

    harness.lifecycle.set_double_sided(group_id, true).await?;
    harness.lifecycle.record_request(group_id, StaffType::Ca).await?;
    let updated = harness.lifecycle.set_joining_date(group_id, joining).await?;

    eyre::ensure!(updated.joining_date() == joining, "joining date not stored");
    eyre::ensure!(updated.is_double_sided(), "double-sided flag not stored");
    eyre::ensure!(
        updated.activity().ca_last_requested_at == Some(ts("2024-02-01T00:00:00Z")),
        "request stamp not stored"
    );
    eyre::ensure!(
        updated.updated_at() == ts("2024-02-01T00:00:00Z"),
        "updated_at was not bumped"
    );
    eyre::ensure!(
        updated.created_at() == ts("2024-01-10T00:00:00Z"),
        "created_at must not change"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_configuration_refuses_to_reopen_terminated_groups() -> eyre::Result<()> {
    let strict = Harness::with_config(PipelineConfig::strict());
    let group_id = strict.start(SEEKER_A, POSTING_X).await?;
    strict
        .record(
            group_id,
            Phase::terminal(PhaseCategory::JobIntroduction, TerminalReason::DeclinedBySeeker),
            ts("2024-01-11T00:00:00Z"),
        )
        .await?;

    let reopened = strict
        .record(group_id, introduced(), ts("2024-01-12T00:00:00Z"))
        .await;

    eyre::ensure!(reopened.is_err(), "terminal group accepted a new phase");
    let history = strict.queries.history(group_id).await?;
    eyre::ensure!(history.len() == 2, "rejected append reached the log");
    Ok(())
}
