//! Task group aggregate and its append-only task history.

use super::{
    JobInformationId, JobSeekerId, PhaseCategory, PipelineDomainError, SelectionFlowPatternId,
    StaffType, Task, TaskGroupId, TaskId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Company and job title used when the posting is sourced outside the
/// agency's own catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPosting {
    /// Employer name.
    pub company_name: String,
    /// Job title.
    pub job_title: String,
}

/// Last request and last watch timestamps per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideActivity {
    /// Last time the RA side was asked to act.
    pub ra_last_requested_at: Option<DateTime<Utc>>,
    /// Last time the CA side was asked to act.
    pub ca_last_requested_at: Option<DateTime<Utc>>,
    /// Last time the RA side viewed the group.
    pub ra_last_watched_at: Option<DateTime<Utc>>,
    /// Last time the CA side viewed the group.
    pub ca_last_watched_at: Option<DateTime<Utc>>,
}

/// Metadata for a task group that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskGroup {
    /// Candidate of the pairing.
    pub job_seeker_id: JobSeekerId,
    /// Posting of the pairing.
    pub job_information_id: JobInformationId,
    /// Selection-flow template, if known.
    pub selection_flow_pattern_id: Option<SelectionFlowPatternId>,
    /// Whether the RA-side agency has full visibility through an alliance.
    pub is_double_sided: bool,
    /// Whether the job seeker applied on their own.
    pub is_self_application: bool,
    /// External posting override.
    pub external: Option<ExternalPosting>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTaskGroup {
    /// Creates metadata for a pairing stamped with the current clock time.
    #[must_use]
    pub fn new(
        job_seeker_id: JobSeekerId,
        job_information_id: JobInformationId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            job_seeker_id,
            job_information_id,
            selection_flow_pattern_id: None,
            is_double_sided: false,
            is_self_application: false,
            external: None,
            created_at: clock.utc(),
        }
    }

    /// Binds the metadata to its store-assigned identity.
    #[must_use]
    pub fn into_group(self, id: TaskGroupId) -> TaskGroup {
        TaskGroup {
            id,
            job_seeker_id: self.job_seeker_id,
            job_information_id: self.job_information_id,
            selection_flow_pattern_id: self.selection_flow_pattern_id,
            is_double_sided: self.is_double_sided,
            is_self_application: self.is_self_application,
            joining_date: None,
            activity: SideActivity::default(),
            external: self.external,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Lifecycle container for one job seeker × job posting pairing.
///
/// Only metadata lives here; the pipeline position is derived from the task
/// log (see [`TaskGroupHistory`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    id: TaskGroupId,
    job_seeker_id: JobSeekerId,
    job_information_id: JobInformationId,
    selection_flow_pattern_id: Option<SelectionFlowPatternId>,
    is_double_sided: bool,
    is_self_application: bool,
    joining_date: Option<NaiveDate>,
    activity: SideActivity,
    external: Option<ExternalPosting>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskGroupData {
    /// Persisted identifier.
    pub id: TaskGroupId,
    /// Candidate of the pairing.
    pub job_seeker_id: JobSeekerId,
    /// Posting of the pairing.
    pub job_information_id: JobInformationId,
    /// Selection-flow template.
    pub selection_flow_pattern_id: Option<SelectionFlowPatternId>,
    /// Alliance visibility flag.
    pub is_double_sided: bool,
    /// Self-application flag.
    pub is_self_application: bool,
    /// Joining date.
    pub joining_date: Option<NaiveDate>,
    /// Request and watch timestamps.
    pub activity: SideActivity,
    /// External posting override.
    pub external: Option<ExternalPosting>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest metadata change.
    pub updated_at: DateTime<Utc>,
}

impl TaskGroup {
    /// Reconstructs a group from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskGroupData) -> Self {
        Self {
            id: data.id,
            job_seeker_id: data.job_seeker_id,
            job_information_id: data.job_information_id,
            selection_flow_pattern_id: data.selection_flow_pattern_id,
            is_double_sided: data.is_double_sided,
            is_self_application: data.is_self_application,
            joining_date: data.joining_date,
            activity: data.activity,
            external: data.external,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub const fn id(&self) -> TaskGroupId {
        self.id
    }

    /// Returns the job seeker.
    #[must_use]
    pub const fn job_seeker_id(&self) -> JobSeekerId {
        self.job_seeker_id
    }

    /// Returns the job posting.
    #[must_use]
    pub const fn job_information_id(&self) -> JobInformationId {
        self.job_information_id
    }

    /// Returns the selection-flow template reference.
    #[must_use]
    pub const fn selection_flow_pattern_id(&self) -> Option<SelectionFlowPatternId> {
        self.selection_flow_pattern_id
    }

    /// Returns `true` when the RA side has alliance visibility.
    #[must_use]
    pub const fn is_double_sided(&self) -> bool {
        self.is_double_sided
    }

    /// Returns `true` for self-applications.
    #[must_use]
    pub const fn is_self_application(&self) -> bool {
        self.is_self_application
    }

    /// Returns the joining date.
    #[must_use]
    pub const fn joining_date(&self) -> Option<NaiveDate> {
        self.joining_date
    }

    /// Returns the request and watch timestamps.
    #[must_use]
    pub const fn activity(&self) -> &SideActivity {
        &self.activity
    }

    /// Returns the external posting override.
    #[must_use]
    pub const fn external(&self) -> Option<&ExternalPosting> {
        self.external.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest metadata change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records that the given side was asked to act.
    pub fn mark_requested(&mut self, side: StaffType, clock: &impl Clock) {
        let now = clock.utc();
        match side {
            StaffType::Ca => self.activity.ca_last_requested_at = Some(now),
            StaffType::Ra => self.activity.ra_last_requested_at = Some(now),
        }
        self.updated_at = now;
    }

    /// Records that the given side viewed the group.
    pub fn mark_watched(&mut self, side: StaffType, clock: &impl Clock) {
        let now = clock.utc();
        match side {
            StaffType::Ca => self.activity.ca_last_watched_at = Some(now),
            StaffType::Ra => self.activity.ra_last_watched_at = Some(now),
        }
        self.updated_at = now;
    }

    /// Assigns or clears the selection-flow template.
    pub fn assign_selection_flow(
        &mut self,
        pattern_id: Option<SelectionFlowPatternId>,
        clock: &impl Clock,
    ) {
        self.selection_flow_pattern_id = pattern_id;
        self.touch(clock);
    }

    /// Sets the alliance visibility flag.
    pub fn set_double_sided(&mut self, is_double_sided: bool, clock: &impl Clock) {
        self.is_double_sided = is_double_sided;
        self.touch(clock);
    }

    /// Sets or clears the joining date.
    pub fn set_joining_date(&mut self, joining_date: Option<NaiveDate>, clock: &impl Clock) {
        self.joining_date = joining_date;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// A task group together with its ordered task log.
///
/// The history is never empty: the first task is held separately so the
/// current state is always available without a fallible lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroupHistory {
    group: TaskGroup,
    first: Task,
    rest: Vec<Task>,
}

impl TaskGroupHistory {
    /// Assembles a history from a group and its tasks in any order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyHistory`] when `tasks` is empty and
    /// [`PipelineDomainError::ForeignTask`] when a task belongs to another
    /// group.
    pub fn new(group: TaskGroup, mut tasks: Vec<Task>) -> Result<Self, PipelineDomainError> {
        if let Some(foreign) = tasks.iter().find(|task| task.task_group_id() != group.id()) {
            return Err(PipelineDomainError::ForeignTask {
                task_group_id: group.id(),
                task_id: foreign.id(),
            });
        }
        tasks.sort_by_key(Task::id);
        let mut ordered = tasks.into_iter();
        let first = ordered
            .next()
            .ok_or(PipelineDomainError::EmptyHistory(group.id()))?;
        Ok(Self {
            group,
            first,
            rest: ordered.collect(),
        })
    }

    /// Returns the group metadata.
    #[must_use]
    pub const fn group(&self) -> &TaskGroup {
        &self.group
    }

    /// Returns the task with the greatest identifier.
    #[must_use]
    pub fn current_state(&self) -> &Task {
        self.rest.last().unwrap_or(&self.first)
    }

    /// Iterates tasks in log order.
    pub fn tasks(&self) -> impl DoubleEndedIterator<Item = &Task> + '_ {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Returns the number of tasks in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; a history owns at least one task.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the task with the given identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks().find(|task| task.id() == id)
    }

    /// Returns the latest task whose own category is at least `min_category`.
    #[must_use]
    pub fn latest_at_or_after(&self, min_category: PhaseCategory) -> Option<&Task> {
        self.tasks()
            .rev()
            .find(|task| task.phase().category() >= min_category)
    }

    /// Appends a freshly stored task.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::ForeignTask`] when the task belongs to
    /// another group or does not extend the log.
    pub fn push(&mut self, task: Task) -> Result<(), PipelineDomainError> {
        if task.task_group_id() != self.group.id() || task.id() <= self.current_state().id() {
            return Err(PipelineDomainError::ForeignTask {
                task_group_id: self.group.id(),
                task_id: task.id(),
            });
        }
        self.rest.push(task);
        Ok(())
    }

    /// Replaces the group metadata.
    pub fn set_group(&mut self, group: TaskGroup) {
        self.group = group;
    }
}
