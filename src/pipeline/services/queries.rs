//! Read-side service deriving pipeline state from the task log.

use super::lifecycle::PipelineServiceResult;
use crate::pipeline::{
    domain::{
        AgentId, ContinuationPolicy, JobInformationId, JobSeekerId, Phase, PhaseCategory,
        PipelineEntry, PipelineView, StaffId, Task, TaskGroup, TaskGroupHistory, TaskGroupId,
        TaskId, resolver,
    },
    ports::{EntryScope, PipelineRepository, PipelineRepositoryError},
};
use std::sync::Arc;

/// Pipeline lookups and dashboards.
#[derive(Clone)]
pub struct PipelineQueryService<R>
where
    R: PipelineRepository,
{
    repository: Arc<R>,
    continuation_policy: ContinuationPolicy,
}

impl<R> PipelineQueryService<R>
where
    R: PipelineRepository,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, continuation_policy: ContinuationPolicy) -> Self {
        Self {
            repository,
            continuation_policy,
        }
    }

    /// Returns the task with the greatest identifier in the group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::NotFound`] (wrapped) when the group
    /// does not exist.
    pub async fn current_state(&self, task_group_id: TaskGroupId) -> PipelineServiceResult<Task> {
        let history = self.history(task_group_id).await?;
        Ok(history.current_state().clone())
    }

    /// Returns the group with its whole task log.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::NotFound`] (wrapped) when the group
    /// does not exist.
    pub async fn history(
        &self,
        task_group_id: TaskGroupId,
    ) -> PipelineServiceResult<TaskGroupHistory> {
        self.repository
            .history(task_group_id)
            .await?
            .ok_or_else(|| {
                PipelineRepositoryError::not_found("history", "task_group", task_group_id.value())
                    .into()
            })
    }

    /// Returns the latest task of every non-terminal group, nearest deadline
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the scan fails.
    pub async fn active_groups(&self) -> PipelineServiceResult<Vec<PipelineEntry>> {
        let entries = self.repository.latest_entries(EntryScope::All).await?;
        Ok(resolver::active_entries(entries))
    }

    /// Returns the non-terminal groups the staff member sees in full.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the scan fails.
    pub async fn active_tasks_for_staff(
        &self,
        staff_id: StaffId,
    ) -> PipelineServiceResult<Vec<PipelineEntry>> {
        let entries = self
            .repository
            .latest_entries(EntryScope::Staff(staff_id))
            .await?;
        Ok(resolver::active_entries_for_staff(entries, staff_id))
    }

    /// Returns every non-terminal group visible to the staff member,
    /// projected at the staff member's access level.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the scan fails.
    pub async fn views_for_staff(
        &self,
        staff_id: StaffId,
    ) -> PipelineServiceResult<Vec<PipelineView>> {
        let entries = self
            .repository
            .latest_entries(EntryScope::Staff(staff_id))
            .await?;
        Ok(resolver::active_entries(entries)
            .iter()
            .filter_map(|entry| PipelineView::project(entry, staff_id))
            .collect())
    }

    /// Returns the most recent task of `category` that may be continued.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::NotFound`] (wrapped) when the group
    /// does not exist.
    pub async fn continuation_task(
        &self,
        task_group_id: TaskGroupId,
        category: PhaseCategory,
    ) -> PipelineServiceResult<Option<Task>> {
        let history = self.history(task_group_id).await?;
        let found = resolver::continuation_task(&history, category, self.continuation_policy);
        if let Some(task) = found
            && task.phase().is_terminal()
        {
            tracing::debug!(
                task_group_id = %task_group_id,
                task_id = %task.id(),
                phase = %task.phase(),
                "continuation lookup returned a terminal task"
            );
        }
        Ok(found.cloned())
    }

    /// Returns the seeker's other active groups parked at exactly `phase`.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the scan fails.
    pub async fn siblings_at_same_phase(
        &self,
        job_seeker_id: JobSeekerId,
        exclude_task: TaskId,
        phase: Phase,
    ) -> PipelineServiceResult<Vec<PipelineEntry>> {
        let entries = self
            .repository
            .latest_entries(EntryScope::JobSeeker(job_seeker_id))
            .await?;
        Ok(resolver::siblings_at_phase(
            entries,
            job_seeker_id,
            exclude_task,
            phase,
        ))
    }

    /// Returns, per group of the seeker, the latest task at or after
    /// `min_category`.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the scan fails.
    pub async fn latest_after_phase(
        &self,
        job_seeker_id: JobSeekerId,
        min_category: PhaseCategory,
    ) -> PipelineServiceResult<Vec<Task>> {
        let histories: Vec<TaskGroupHistory> = self
            .repository
            .histories(EntryScope::JobSeeker(job_seeker_id))
            .await?
            .into_iter()
            .map(|owned| owned.history)
            .collect();
        Ok(resolver::latest_after_phase(&histories, min_category))
    }

    /// Returns non-terminal groups shared by two agencies in either
    /// direction, ignoring alliance visibility.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the scan fails.
    pub async fn tasks_by_each_agent_pair(
        &self,
        first: AgentId,
        second: AgentId,
    ) -> PipelineServiceResult<Vec<PipelineEntry>> {
        let entries = self
            .repository
            .latest_entries(EntryScope::Agent(first))
            .await?;
        Ok(resolver::entries_between_agents(entries, first, second))
    }

    /// Returns the tasks with the given identifiers.
    ///
    /// An empty slice returns immediately without touching the store.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn tasks_by_ids(&self, ids: &[TaskId]) -> PipelineServiceResult<Vec<Task>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repository.find_tasks_by_ids(ids).await?)
    }

    /// Returns the groups with the given identifiers.
    ///
    /// An empty slice returns immediately without touching the store.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn groups_by_ids(&self, ids: &[TaskGroupId]) -> PipelineServiceResult<Vec<TaskGroup>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repository.find_groups_by_ids(ids).await?)
    }

    /// Returns the group of a job seeker × posting pairing, if any.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_group_for_pair(
        &self,
        job_seeker_id: JobSeekerId,
        job_information_id: JobInformationId,
    ) -> PipelineServiceResult<Option<TaskGroup>> {
        Ok(self
            .repository
            .find_group_by_pair(job_seeker_id, job_information_id)
            .await?)
    }
}
