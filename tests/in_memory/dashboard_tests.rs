//! Active lists, staff-scoped views, and continuation lookups.

use super::helpers::{
    CA_AGENT, CA_STAFF, Harness, POSTING_X, POSTING_Y, RA_AGENT, RA_STAFF, SEEKER_A, SEEKER_B,
    at_step, harness, ts,
};
use recruitflow::pipeline::domain::{
    AgentId, Phase, PhaseCategory, StaffAccess, TaskDetails, TerminalReason, step,
};
use rstest::rstest;

fn scheduled() -> Phase {
    at_step(PhaseCategory::FirstSelection, step::selection::SCHEDULED)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminated_groups_drop_out_of_active_lists(harness: Harness) -> eyre::Result<()> {
    let active = harness.start(SEEKER_A, POSTING_X).await?;
    let rejected = harness.start(SEEKER_A, POSTING_Y).await?;
    let closed = harness.start(SEEKER_B, POSTING_X).await?;
    harness
        .record(
            rejected,
            Phase::terminal(PhaseCategory::FirstSelection, TerminalReason::RejectedByCompany),
            ts("2024-01-11T00:00:00Z"),
        )
        .await?;
    harness.record(closed, Phase::closed(), ts("2024-01-12T00:00:00Z")).await?;

    let listed: Vec<_> = harness
        .queries
        .active_groups()
        .await?
        .into_iter()
        .map(|entry| entry.group.id())
        .collect();

    eyre::ensure!(listed.contains(&active), "active group missing");
    eyre::ensure!(listed.contains(&closed), "closed group missing");
    eyre::ensure!(!listed.contains(&rejected), "terminal group listed as active");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ra_staff_see_single_sided_groups_as_summaries(harness: Harness) -> eyre::Result<()> {
    let single = harness.start(SEEKER_A, POSTING_X).await?;
    let shared = harness.start(SEEKER_B, POSTING_Y).await?;
    harness.lifecycle.set_double_sided(shared, true).await?;
    let latest = harness.queries.current_state(single).await?;
    harness
        .lifecycle
        .update_latest_task(
            latest.id(),
            TaskDetails::default().with_remarks("seeker prefers remote work"),
        )
        .await?;

    let ra_tasks = harness.queries.active_tasks_for_staff(RA_STAFF).await?;
    let ca_tasks = harness.queries.active_tasks_for_staff(CA_STAFF).await?;
    let ra_views = harness.queries.views_for_staff(RA_STAFF).await?;
    let summary = ra_views
        .iter()
        .find(|view| view.task_group_id == single)
        .ok_or_else(|| eyre::eyre!("single-sided group missing from RA views"))?;

    eyre::ensure!(
        ra_tasks.iter().map(|entry| entry.group.id()).collect::<Vec<_>>() == vec![shared],
        "RA task list should only hold the double-sided group"
    );
    eyre::ensure!(ca_tasks.len() == 2, "CA staff should see both groups");
    eyre::ensure!(summary.access == StaffAccess::Summary, "expected summary access");
    eyre::ensure!(summary.remarks.is_none(), "remarks leaked to a summary view");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn continuation_returns_terminal_rows_the_dashboard_hides(
    harness: Harness,
) -> eyre::Result<()> {
    let group_id = harness.start(SEEKER_A, POSTING_X).await?;
    harness.record(group_id, scheduled(), ts("2024-01-11T00:00:00Z")).await?;
    let rejected_id = harness
        .record(
            group_id,
            Phase::terminal(PhaseCategory::FirstSelection, TerminalReason::RejectedByCompany),
            ts("2024-01-12T00:00:00Z"),
        )
        .await?;

    let continuation = harness
        .queries
        .continuation_task(group_id, PhaseCategory::FirstSelection)
        .await?;
    let active = harness.queries.active_groups().await?;

    eyre::ensure!(
        continuation.map(|task| task.id()) == Some(rejected_id),
        "default continuation should return the terminal task"
    );
    eyre::ensure!(active.is_empty(), "terminal group listed as active");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn siblings_share_seeker_and_exact_phase(harness: Harness) -> eyre::Result<()> {
    let first = harness.start(SEEKER_A, POSTING_X).await?;
    let second = harness.start(SEEKER_A, POSTING_Y).await?;
    let other_seeker = harness.start(SEEKER_B, POSTING_X).await?;
    let own_task = harness.record(first, scheduled(), ts("2024-01-11T00:00:00Z")).await?;
    harness.record(second, scheduled(), ts("2024-01-11T01:00:00Z")).await?;
    harness.record(other_seeker, scheduled(), ts("2024-01-11T02:00:00Z")).await?;

    let siblings = harness
        .queries
        .siblings_at_same_phase(SEEKER_A, own_task, scheduled())
        .await?;

    eyre::ensure!(
        siblings.iter().map(|entry| entry.group.id()).collect::<Vec<_>>() == vec![second],
        "unexpected siblings"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn latest_after_phase_reports_groups_past_the_threshold(
    harness: Harness,
) -> eyre::Result<()> {
    let advanced = harness.start(SEEKER_A, POSTING_X).await?;
    harness.start(SEEKER_A, POSTING_Y).await?;
    harness.record(advanced, scheduled(), ts("2024-01-11T00:00:00Z")).await?;
    let latest = harness
        .record(
            advanced,
            at_step(PhaseCategory::FirstSelection, step::selection::AWAITING_RESULT),
            ts("2024-01-12T00:00:00Z"),
        )
        .await?;

    let tasks = harness
        .queries
        .latest_after_phase(SEEKER_A, PhaseCategory::FirstSelection)
        .await?;

    eyre::ensure!(
        tasks.iter().map(|task| task.id()).collect::<Vec<_>>() == vec![latest],
        "unexpected tasks {tasks:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_pair_lookup_ignores_alliance_visibility(harness: Harness) -> eyre::Result<()> {
    harness.start(SEEKER_A, POSTING_X).await?;

    let forward = harness.queries.tasks_by_each_agent_pair(CA_AGENT, RA_AGENT).await?;
    let reverse = harness.queries.tasks_by_each_agent_pair(RA_AGENT, CA_AGENT).await?;
    let unrelated = harness
        .queries
        .tasks_by_each_agent_pair(CA_AGENT, AgentId::new(99))
        .await?;

    eyre::ensure!(forward.len() == 1, "forward pair lookup missed the group");
    eyre::ensure!(reverse.len() == 1, "reverse pair lookup missed the group");
    eyre::ensure!(unrelated.is_empty(), "unrelated agency matched");
    Ok(())
}
