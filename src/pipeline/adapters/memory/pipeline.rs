//! In-memory pipeline repository for tests and local tooling.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::pipeline::{
    domain::{
        AgentId, AppendedTask, EvaluationPoint, EvaluationPointId, JobInformationId, JobSeekerId,
        NewSelectionFlowPattern, NewTaskGroup, Ownership, PipelineEntry, SelectionFlowPattern,
        SelectionFlowPatternId, SelectionQuestionnaire, SelectionQuestionnaireId, StaffId, Task,
        TaskDetails, TaskDraft, TaskGroup, TaskGroupHistory, TaskGroupId, TaskId, TaskSatellites,
    },
    ports::{
        EntryScope, OwnedHistory, PipelineRepository, PipelineRepositoryError,
        PipelineRepositoryResult,
    },
};

/// Thread-safe in-memory pipeline repository.
///
/// Job seeker and posting ownership stand in for the tables owned by other
/// subsystems and must be registered before groups reference them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPipelineRepository {
    state: Arc<RwLock<InMemoryPipelineState>>,
}

#[derive(Debug, Clone, Copy)]
struct Owner {
    agent_id: AgentId,
    staff_id: Option<StaffId>,
}

#[derive(Debug, Default)]
struct InMemoryPipelineState {
    last_id: i64,
    groups: BTreeMap<TaskGroupId, TaskGroup>,
    tasks: BTreeMap<TaskId, Task>,
    group_tasks: HashMap<TaskGroupId, Vec<TaskId>>,
    evaluation_points: HashMap<TaskId, EvaluationPoint>,
    questionnaires: HashMap<TaskId, SelectionQuestionnaire>,
    flows: HashMap<SelectionFlowPatternId, SelectionFlowPattern>,
    seeker_owners: HashMap<JobSeekerId, Owner>,
    posting_owners: HashMap<JobInformationId, Owner>,
}

impl InMemoryPipelineState {
    /// Hands out identifiers from one sequence so log order is total.
    const fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn ownership(&self, group: &TaskGroup) -> Option<Ownership> {
        let ca = self.seeker_owners.get(&group.job_seeker_id())?;
        let ra = self.posting_owners.get(&group.job_information_id())?;
        Some(Ownership {
            ca_agent_id: ca.agent_id,
            ca_staff_id: ca.staff_id,
            ra_agent_id: ra.agent_id,
            ra_staff_id: ra.staff_id,
        })
    }

    fn history(
        &self,
        operation: &'static str,
        group: &TaskGroup,
    ) -> PipelineRepositoryResult<TaskGroupHistory> {
        let tasks = self
            .group_tasks
            .get(&group.id())
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(id).cloned())
            .collect();
        TaskGroupHistory::new(group.clone(), tasks)
            .map_err(|err| PipelineRepositoryError::persistence(operation, err))
    }

    fn latest(&self, group_id: TaskGroupId) -> Option<&Task> {
        self.group_tasks
            .get(&group_id)?
            .iter()
            .max()
            .and_then(|id| self.tasks.get(id))
    }

    fn in_scope(scope: EntryScope, group: &TaskGroup, ownership: &Ownership) -> bool {
        match scope {
            EntryScope::All => true,
            EntryScope::JobSeeker(id) => group.job_seeker_id() == id,
            EntryScope::Staff(id) => {
                ownership.ca_staff_id == Some(id) || ownership.ra_staff_id == Some(id)
            }
            EntryScope::Agent(id) => ownership.ca_agent_id == id || ownership.ra_agent_id == id,
        }
    }

    fn scoped(&self, scope: EntryScope) -> impl Iterator<Item = (&TaskGroup, Ownership)> + '_ {
        self.groups.values().filter_map(move |group| {
            let ownership = self.ownership(group)?;
            Self::in_scope(scope, group, &ownership).then_some((group, ownership))
        })
    }

    fn insert_task(&mut self, group_id: TaskGroupId, draft: TaskDraft) -> Task {
        let task = draft.into_task(TaskId::new(self.next_id()), group_id);
        self.group_tasks.entry(group_id).or_default().push(task.id());
        self.tasks.insert(task.id(), task.clone());
        task
    }

    /// Rejects satellites the store would refuse, before anything is written.
    fn check_satellites(
        &self,
        operation: &'static str,
        satellites: &TaskSatellites,
    ) -> PipelineRepositoryResult<()> {
        let Some(token) = satellites.questionnaire_token else {
            return Ok(());
        };
        if self
            .questionnaires
            .values()
            .any(|existing| existing.access_token == token)
        {
            return Err(PipelineRepositoryError::constraint(
                operation,
                format!("questionnaire access token {token} is already issued"),
            ));
        }
        Ok(())
    }

    fn attach_satellites(
        &mut self,
        task: &Task,
        job_seeker_id: JobSeekerId,
        satellites: TaskSatellites,
    ) -> (Option<EvaluationPoint>, Option<SelectionQuestionnaire>) {
        let created_at = task.created_at();
        let evaluation_point = satellites.evaluation.map(|input| EvaluationPoint {
            id: EvaluationPointId::new(self.next_id()),
            task_id: task.id(),
            input,
            created_at,
        });
        if let Some(point) = &evaluation_point {
            self.evaluation_points.insert(task.id(), point.clone());
        }
        let questionnaire = satellites
            .questionnaire_token
            .map(|access_token| SelectionQuestionnaire {
                id: SelectionQuestionnaireId::new(self.next_id()),
                task_id: task.id(),
                job_seeker_id,
                access_token,
                is_answered: false,
                created_at,
            });
        if let Some(record) = &questionnaire {
            self.questionnaires.insert(task.id(), record.clone());
        }
        (evaluation_point, questionnaire)
    }
}

impl InMemoryPipelineRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the CA-side ownership of a job seeker.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn register_job_seeker(
        &self,
        job_seeker_id: JobSeekerId,
        agent_id: AgentId,
        staff_id: Option<StaffId>,
    ) -> PipelineRepositoryResult<()> {
        let mut state = self.write("register_job_seeker")?;
        state
            .seeker_owners
            .insert(job_seeker_id, Owner { agent_id, staff_id });
        Ok(())
    }

    /// Registers the RA-side ownership of a job posting.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn register_job_information(
        &self,
        job_information_id: JobInformationId,
        agent_id: AgentId,
        staff_id: Option<StaffId>,
    ) -> PipelineRepositoryResult<()> {
        let mut state = self.write("register_job_information")?;
        state
            .posting_owners
            .insert(job_information_id, Owner { agent_id, staff_id });
        Ok(())
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> PipelineRepositoryResult<RwLockReadGuard<'_, InMemoryPipelineState>> {
        self.state.read().map_err(|err| {
            PipelineRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> PipelineRepositoryResult<RwLockWriteGuard<'_, InMemoryPipelineState>> {
        self.state.write().map_err(|err| {
            PipelineRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl PipelineRepository for InMemoryPipelineRepository {
    async fn create_group(
        &self,
        group: NewTaskGroup,
        first_task: TaskDraft,
        satellites: TaskSatellites,
    ) -> PipelineRepositoryResult<TaskGroupHistory> {
        const OP: &str = "create_group";
        let mut state = self.write(OP)?;
        if !state.seeker_owners.contains_key(&group.job_seeker_id) {
            return Err(PipelineRepositoryError::constraint(
                OP,
                format!("unknown job seeker {}", group.job_seeker_id),
            ));
        }
        if !state.posting_owners.contains_key(&group.job_information_id) {
            return Err(PipelineRepositoryError::constraint(
                OP,
                format!("unknown job information {}", group.job_information_id),
            ));
        }
        let duplicate = state.groups.values().any(|existing| {
            existing.job_seeker_id() == group.job_seeker_id
                && existing.job_information_id() == group.job_information_id
        });
        if duplicate {
            return Err(PipelineRepositoryError::constraint(
                OP,
                format!(
                    "job seeker {} already has a task group for job information {}",
                    group.job_seeker_id, group.job_information_id
                ),
            ));
        }
        if let Some(pattern_id) = group.selection_flow_pattern_id
            && !state.flows.contains_key(&pattern_id)
        {
            return Err(PipelineRepositoryError::constraint(
                OP,
                format!("unknown selection flow pattern {pattern_id}"),
            ));
        }

        state.check_satellites(OP, &satellites)?;

        let stored = group.into_group(TaskGroupId::new(state.next_id()));
        let task = state.insert_task(stored.id(), first_task);
        state.attach_satellites(&task, stored.job_seeker_id(), satellites);
        state.groups.insert(stored.id(), stored.clone());
        TaskGroupHistory::new(stored, vec![task])
            .map_err(|err| PipelineRepositoryError::persistence(OP, err))
    }

    async fn append_task(
        &self,
        task_group_id: TaskGroupId,
        draft: TaskDraft,
        satellites: TaskSatellites,
    ) -> PipelineRepositoryResult<AppendedTask> {
        const OP: &str = "append_task";
        let mut state = self.write(OP)?;
        let job_seeker_id = state
            .groups
            .get(&task_group_id)
            .map(TaskGroup::job_seeker_id)
            .ok_or(PipelineRepositoryError::not_found(
                OP,
                "task_group",
                task_group_id.value(),
            ))?;
        state.check_satellites(OP, &satellites)?;

        let task = state.insert_task(task_group_id, draft);
        let (evaluation_point, questionnaire) =
            state.attach_satellites(&task, job_seeker_id, satellites);

        Ok(AppendedTask {
            task,
            evaluation_point,
            questionnaire,
        })
    }

    async fn update_latest_task(
        &self,
        task_id: TaskId,
        details: TaskDetails,
    ) -> PipelineRepositoryResult<Task> {
        const OP: &str = "update_latest_task";
        let mut state = self.write(OP)?;
        let existing = state
            .tasks
            .get(&task_id)
            .ok_or(PipelineRepositoryError::not_found(OP, "task", task_id.value()))?;
        let latest_id = state.latest(existing.task_group_id()).map(Task::id);
        if latest_id != Some(task_id) {
            return Err(PipelineRepositoryError::constraint(
                OP,
                format!("task {task_id} is not the latest task of its group"),
            ));
        }
        let updated = existing.with_details(details);
        state.tasks.insert(task_id, updated.clone());
        Ok(updated)
    }

    async fn update_group(&self, group: &TaskGroup) -> PipelineRepositoryResult<()> {
        const OP: &str = "update_group";
        let mut state = self.write(OP)?;
        let existing = state
            .groups
            .get_mut(&group.id())
            .ok_or(PipelineRepositoryError::not_found(OP, "task_group", group.id().value()))?;
        if existing.job_seeker_id() != group.job_seeker_id()
            || existing.job_information_id() != group.job_information_id()
        {
            return Err(PipelineRepositoryError::constraint(
                OP,
                "task group pairing is immutable",
            ));
        }
        *existing = group.clone();
        Ok(())
    }

    async fn find_group(&self, id: TaskGroupId) -> PipelineRepositoryResult<Option<TaskGroup>> {
        let state = self.read("find_group")?;
        Ok(state.groups.get(&id).cloned())
    }

    async fn find_group_by_pair(
        &self,
        job_seeker_id: JobSeekerId,
        job_information_id: JobInformationId,
    ) -> PipelineRepositoryResult<Option<TaskGroup>> {
        let state = self.read("find_group_by_pair")?;
        Ok(state
            .groups
            .values()
            .find(|group| {
                group.job_seeker_id() == job_seeker_id
                    && group.job_information_id() == job_information_id
            })
            .cloned())
    }

    async fn find_groups_by_ids(
        &self,
        ids: &[TaskGroupId],
    ) -> PipelineRepositoryResult<Vec<TaskGroup>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let state = self.read("find_groups_by_ids")?;
        Ok(state
            .groups
            .values()
            .filter(|group| ids.contains(&group.id()))
            .cloned()
            .collect())
    }

    async fn find_tasks_by_ids(&self, ids: &[TaskId]) -> PipelineRepositoryResult<Vec<Task>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let state = self.read("find_tasks_by_ids")?;
        Ok(state
            .tasks
            .values()
            .filter(|task| ids.contains(&task.id()))
            .cloned()
            .collect())
    }

    async fn history(
        &self,
        id: TaskGroupId,
    ) -> PipelineRepositoryResult<Option<TaskGroupHistory>> {
        const OP: &str = "history";
        let state = self.read(OP)?;
        state
            .groups
            .get(&id)
            .map(|group| state.history(OP, group))
            .transpose()
    }

    async fn latest_entries(
        &self,
        scope: EntryScope,
    ) -> PipelineRepositoryResult<Vec<PipelineEntry>> {
        let state = self.read("latest_entries")?;
        Ok(state
            .scoped(scope)
            .filter_map(|(group, ownership)| {
                state.latest(group.id()).map(|latest| PipelineEntry {
                    group: group.clone(),
                    latest: latest.clone(),
                    ownership,
                })
            })
            .collect())
    }

    async fn histories(&self, scope: EntryScope) -> PipelineRepositoryResult<Vec<OwnedHistory>> {
        const OP: &str = "histories";
        let state = self.read(OP)?;
        state
            .scoped(scope)
            .map(|(group, ownership)| {
                state
                    .history(OP, group)
                    .map(|history| OwnedHistory { history, ownership })
            })
            .collect()
    }

    async fn find_evaluation_point(
        &self,
        task_id: TaskId,
    ) -> PipelineRepositoryResult<Option<EvaluationPoint>> {
        let state = self.read("find_evaluation_point")?;
        Ok(state.evaluation_points.get(&task_id).cloned())
    }

    async fn find_questionnaire(
        &self,
        task_id: TaskId,
    ) -> PipelineRepositoryResult<Option<SelectionQuestionnaire>> {
        let state = self.read("find_questionnaire")?;
        Ok(state.questionnaires.get(&task_id).cloned())
    }

    async fn store_selection_flow(
        &self,
        pattern: NewSelectionFlowPattern,
    ) -> PipelineRepositoryResult<SelectionFlowPattern> {
        let mut state = self.write("store_selection_flow")?;
        let stored = SelectionFlowPattern {
            id: SelectionFlowPatternId::new(state.next_id()),
            name: pattern.name,
            steps: pattern.steps,
        };
        state.flows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_selection_flow(
        &self,
        id: SelectionFlowPatternId,
    ) -> PipelineRepositoryResult<Option<SelectionFlowPattern>> {
        let state = self.read("find_selection_flow")?;
        Ok(state.flows.get(&id).cloned())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
