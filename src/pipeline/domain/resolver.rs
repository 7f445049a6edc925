//! Latest-state resolution over the task log.
//!
//! "Current state" is never stored: it is the task with the greatest
//! identifier in a group. The functions here derive dashboards and lookups
//! from [`PipelineEntry`] values (one per group) and [`TaskGroupHistory`]
//! values (the whole log of a group).

use super::{
    AgentId, JobSeekerId, Phase, PhaseCategory, PipelineEntry, StaffAccess, StaffId, Task,
    TaskGroupHistory, TaskId,
};
use serde::{Deserialize, Serialize};

/// Which tasks a continuation lookup may return.
///
/// The legacy rule admits every task whose raw sub-category is below 100,
/// which includes the terminal range `90..=99` that the active dashboards
/// exclude. The two rules disagree; the default keeps the legacy behaviour
/// until the product decides otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationPolicy {
    /// Raw sub-category `< 100`, terminal outcomes included.
    #[default]
    BelowHundred,
    /// Ongoing outcomes below 100 only.
    ExcludeTerminal,
}

impl ContinuationPolicy {
    /// Raw sub-category cut-off of the legacy rule.
    const CUTOFF: i32 = 100;

    /// Returns `true` when a task at `phase` may be continued.
    #[must_use]
    pub fn admits(self, phase: Phase) -> bool {
        let below_cutoff = phase.raw_sub_category() < Self::CUTOFF;
        match self {
            Self::BelowHundred => below_cutoff,
            Self::ExcludeTerminal => below_cutoff && phase.is_ongoing(),
        }
    }
}

/// Returns `true` when the group's latest task is not terminal.
#[must_use]
pub fn is_active(entry: &PipelineEntry) -> bool {
    !entry.latest.phase().is_terminal()
}

/// Sorts entries nearest deadline first, breaking ties by task identifier.
pub fn sort_by_deadline(entries: &mut [PipelineEntry]) {
    entries.sort_by(|left, right| {
        left.latest
            .deadline()
            .urgency_cmp(&right.latest.deadline())
            .then_with(|| left.latest.id().cmp(&right.latest.id()))
    });
}

/// Keeps active entries, ordered by deadline.
#[must_use]
pub fn active_entries(entries: Vec<PipelineEntry>) -> Vec<PipelineEntry> {
    let mut active: Vec<_> = entries.into_iter().filter(is_active).collect();
    sort_by_deadline(&mut active);
    active
}

/// Keeps active entries the staff member may see in full, ordered by
/// deadline.
#[must_use]
pub fn active_entries_for_staff(
    entries: Vec<PipelineEntry>,
    staff_id: StaffId,
) -> Vec<PipelineEntry> {
    active_entries(
        entries
            .into_iter()
            .filter(|entry| StaffAccess::for_entry(staff_id, entry) == StaffAccess::Full)
            .collect(),
    )
}

/// Keeps active entries shared between two agencies in either direction,
/// regardless of alliance visibility.
#[must_use]
pub fn entries_between_agents(
    entries: Vec<PipelineEntry>,
    first: AgentId,
    second: AgentId,
) -> Vec<PipelineEntry> {
    active_entries(
        entries
            .into_iter()
            .filter(|entry| entry.ownership.pairs(first, second))
            .collect(),
    )
}

/// Keeps other active groups of the seeker parked at exactly `phase`.
///
/// The group whose latest task is `exclude_task` is left out.
#[must_use]
pub fn siblings_at_phase(
    entries: Vec<PipelineEntry>,
    job_seeker_id: JobSeekerId,
    exclude_task: TaskId,
    phase: Phase,
) -> Vec<PipelineEntry> {
    active_entries(
        entries
            .into_iter()
            .filter(|entry| {
                entry.group.job_seeker_id() == job_seeker_id
                    && entry.latest.id() != exclude_task
                    && entry.latest.phase() == phase
            })
            .collect(),
    )
}

/// Returns the most recent task of `category` admitted by `policy`.
#[must_use]
pub fn continuation_task(
    history: &TaskGroupHistory,
    category: PhaseCategory,
    policy: ContinuationPolicy,
) -> Option<&Task> {
    history
        .tasks()
        .rev()
        .find(|task| task.phase().category() == category && policy.admits(task.phase()))
}

/// Returns, per history, the latest task at or after `min_category`.
///
/// Histories without such a task are omitted.
#[must_use]
pub fn latest_after_phase(histories: &[TaskGroupHistory], min_category: PhaseCategory) -> Vec<Task> {
    histories
        .iter()
        .filter_map(|history| history.latest_at_or_after(min_category))
        .cloned()
        .collect()
}
