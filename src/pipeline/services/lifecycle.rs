//! Service layer for candidacy creation and task-log appends.

use crate::config::PipelineConfig;
use crate::pipeline::{
    domain::{
        AppendedTask, EvaluationInput, ExternalPosting, JobInformationId, JobSeekerId,
        NewTaskGroup, Phase, PipelineDomainError, SatelliteRequirements, SelectionFlowPatternId,
        StaffId, StaffType, Task, TaskDetails, TaskDraft, TaskGroup, TaskGroupHistory,
        TaskGroupId, TaskId, TaskSatellites,
    },
    ports::{PipelineRepository, PipelineRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Request payload for recording a phase transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    phase: Phase,
    staff_type: StaffType,
    executed_staff_id: StaffId,
    details: TaskDetails,
    evaluation: Option<EvaluationInput>,
}

impl TaskRequest {
    /// Creates a request with empty descriptive fields.
    #[must_use]
    pub fn new(phase: Phase, staff_type: StaffType, executed_staff_id: StaffId) -> Self {
        Self {
            phase,
            staff_type,
            executed_staff_id,
            details: TaskDetails::default(),
            evaluation: None,
        }
    }

    /// Sets the descriptive fields.
    #[must_use]
    pub fn with_details(mut self, details: TaskDetails) -> Self {
        self.details = details;
        self
    }

    /// Supplies evaluation notes for result-bearing phases.
    #[must_use]
    pub fn with_evaluation(mut self, evaluation: EvaluationInput) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    /// Returns the requested phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    fn into_draft(self, clock: &impl Clock) -> (TaskDraft, Option<EvaluationInput>) {
        let draft = TaskDraft::new(
            self.phase,
            self.staff_type,
            self.executed_staff_id,
            self.details,
            clock,
        );
        (draft, self.evaluation)
    }
}

/// Request payload for opening a candidacy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCandidacyRequest {
    job_seeker_id: JobSeekerId,
    job_information_id: JobInformationId,
    selection_flow_pattern_id: Option<SelectionFlowPatternId>,
    is_double_sided: bool,
    is_self_application: bool,
    external: Option<ExternalPosting>,
    first_task: TaskRequest,
}

impl StartCandidacyRequest {
    /// Creates a request for a pairing and its first task.
    #[must_use]
    pub const fn new(
        job_seeker_id: JobSeekerId,
        job_information_id: JobInformationId,
        first_task: TaskRequest,
    ) -> Self {
        Self {
            job_seeker_id,
            job_information_id,
            selection_flow_pattern_id: None,
            is_double_sided: false,
            is_self_application: false,
            external: None,
            first_task,
        }
    }

    /// Assigns a selection-flow template.
    #[must_use]
    pub const fn with_selection_flow(mut self, pattern_id: SelectionFlowPatternId) -> Self {
        self.selection_flow_pattern_id = Some(pattern_id);
        self
    }

    /// Marks the group as double-sided.
    #[must_use]
    pub const fn double_sided(mut self) -> Self {
        self.is_double_sided = true;
        self
    }

    /// Marks the group as a self-application.
    #[must_use]
    pub const fn self_application(mut self) -> Self {
        self.is_self_application = true;
        self
    }

    /// Overrides catalogue data with an external posting.
    #[must_use]
    pub fn with_external(mut self, external: ExternalPosting) -> Self {
        self.external = Some(external);
        self
    }
}

/// Service-level errors for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PipelineDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PipelineRepositoryError),
}

/// Result type for pipeline service operations.
pub type PipelineServiceResult<T> = Result<T, PipelineServiceError>;

/// Candidacy lifecycle orchestration service.
///
/// Every write goes through here so the transition policy and the
/// selection-flow linkage are applied before anything reaches the log.
#[derive(Clone)]
pub struct PipelineService<R, C>
where
    R: PipelineRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: PipelineConfig,
}

impl<R, C> PipelineService<R, C>
where
    R: PipelineRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new pipeline service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, config: PipelineConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Opens a candidacy: stores the group, its first task, and the
    /// satellites that task requires atomically.
    ///
    /// When the request names a selection flow, the first task goes through
    /// the same linkage as [`Self::append_task`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EvaluationPointRequired`] when the first
    /// task is result-bearing under the flow and carries no evaluation notes,
    /// and [`PipelineServiceError::Repository`] when the flow does not exist,
    /// the pairing already has a group, or either side is unknown to the
    /// store.
    pub async fn start_candidacy(
        &self,
        request: StartCandidacyRequest,
    ) -> PipelineServiceResult<TaskGroupHistory> {
        const OP: &str = "start_candidacy";
        let pattern = match request.selection_flow_pattern_id {
            Some(pattern_id) => Some(
                self.repository
                    .find_selection_flow(pattern_id)
                    .await?
                    .ok_or_else(|| {
                        PipelineRepositoryError::not_found(
                            OP,
                            "selection_flow_pattern",
                            pattern_id.value(),
                        )
                    })?,
            ),
            None => None,
        };
        let mut group =
            NewTaskGroup::new(request.job_seeker_id, request.job_information_id, &*self.clock);
        group.selection_flow_pattern_id = request.selection_flow_pattern_id;
        group.is_double_sided = request.is_double_sided;
        group.is_self_application = request.is_self_application;
        group.external = request.external;
        let phase = request.first_task.phase();
        let requirements = SatelliteRequirements::for_phase(pattern.as_ref(), phase);
        let (draft, evaluation) = request.first_task.into_draft(&*self.clock);
        let satellites = link_satellites(None, phase, requirements, evaluation)?;
        let evaluation_point = satellites.evaluation.is_some();
        let questionnaire = satellites.questionnaire_token.is_some();

        let history = self
            .repository
            .create_group(group, draft, satellites)
            .await?;
        tracing::info!(
            task_group_id = %history.group().id(),
            job_seeker_id = %history.group().job_seeker_id(),
            job_information_id = %history.group().job_information_id(),
            phase = %phase,
            evaluation_point,
            questionnaire,
            "candidacy started"
        );
        Ok(history)
    }

    /// Appends a phase transition to a group.
    ///
    /// The transition policy is checked against the group's current state.
    /// When the group's selection flow maps the phase to a step, the
    /// required evaluation point and questionnaire are stored with the task.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::IllegalTransition`] when the policy
    /// rejects the edge, [`PipelineDomainError::EvaluationPointRequired`]
    /// when a result-bearing phase arrives without evaluation notes, and
    /// [`PipelineServiceError::Repository`] when the group does not exist or
    /// persistence fails.
    pub async fn append_task(
        &self,
        task_group_id: TaskGroupId,
        request: TaskRequest,
    ) -> PipelineServiceResult<AppendedTask> {
        let history = self.load_history("append_task", task_group_id).await?;
        let from = history.current_state().phase();
        let to = request.phase();
        if !self.config.transition_policy.permits(from, to) {
            tracing::warn!(
                task_group_id = %task_group_id,
                from = %from,
                to = %to,
                "rejected illegal phase transition"
            );
            return Err(PipelineDomainError::IllegalTransition {
                task_group_id,
                from,
                to,
            }
            .into());
        }

        let pattern = match history.group().selection_flow_pattern_id() {
            Some(pattern_id) => self.repository.find_selection_flow(pattern_id).await?,
            None => None,
        };
        let requirements = SatelliteRequirements::for_phase(pattern.as_ref(), to);
        let (draft, evaluation) = request.into_draft(&*self.clock);
        let satellites = link_satellites(Some(task_group_id), to, requirements, evaluation)?;

        let appended = self
            .repository
            .append_task(task_group_id, draft, satellites)
            .await?;
        tracing::info!(
            task_group_id = %task_group_id,
            task_id = %appended.task.id(),
            phase = %to,
            evaluation_point = appended.evaluation_point.is_some(),
            questionnaire = appended.questionnaire.is_some(),
            "task appended"
        );
        Ok(appended)
    }

    /// Replaces the descriptive fields of the latest task of its group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::NotLatestTask`] when a newer task
    /// exists and [`PipelineServiceError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn update_latest_task(
        &self,
        task_id: TaskId,
        details: TaskDetails,
    ) -> PipelineServiceResult<Task> {
        const OP: &str = "update_latest_task";
        let task = self
            .repository
            .find_tasks_by_ids(&[task_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PipelineRepositoryError::not_found(OP, "task", task_id.value()))?;
        let history = self.load_history(OP, task.task_group_id()).await?;
        let latest_id = history.current_state().id();
        if latest_id != task_id {
            return Err(PipelineDomainError::NotLatestTask {
                task_group_id: task.task_group_id(),
                task_id,
                latest_id,
            }
            .into());
        }
        let updated = self.repository.update_latest_task(task_id, details).await?;
        tracing::debug!(task_id = %task_id, "latest task details updated");
        Ok(updated)
    }

    /// Records that one side was asked to act on a group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::Repository`] when the group does not
    /// exist or persistence fails.
    pub async fn record_request(
        &self,
        task_group_id: TaskGroupId,
        side: StaffType,
    ) -> PipelineServiceResult<TaskGroup> {
        self.modify_group("record_request", task_group_id, |group, clock| {
            group.mark_requested(side, clock);
        })
        .await
    }

    /// Records that one side viewed a group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::Repository`] when the group does not
    /// exist or persistence fails.
    pub async fn record_watch(
        &self,
        task_group_id: TaskGroupId,
        side: StaffType,
    ) -> PipelineServiceResult<TaskGroup> {
        self.modify_group("record_watch", task_group_id, |group, clock| {
            group.mark_watched(side, clock);
        })
        .await
    }

    /// Assigns or clears the selection-flow template of a group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::Repository`] when the group or the
    /// template does not exist.
    pub async fn assign_selection_flow(
        &self,
        task_group_id: TaskGroupId,
        pattern_id: Option<SelectionFlowPatternId>,
    ) -> PipelineServiceResult<TaskGroup> {
        const OP: &str = "assign_selection_flow";
        if let Some(id) = pattern_id
            && self.repository.find_selection_flow(id).await?.is_none()
        {
            return Err(
                PipelineRepositoryError::not_found(OP, "selection_flow_pattern", id.value())
                    .into(),
            );
        }
        self.modify_group(OP, task_group_id, |group, clock| {
            group.assign_selection_flow(pattern_id, clock);
        })
        .await
    }

    /// Sets the alliance visibility flag of a group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::Repository`] when the group does not
    /// exist or persistence fails.
    pub async fn set_double_sided(
        &self,
        task_group_id: TaskGroupId,
        is_double_sided: bool,
    ) -> PipelineServiceResult<TaskGroup> {
        self.modify_group("set_double_sided", task_group_id, |group, clock| {
            group.set_double_sided(is_double_sided, clock);
        })
        .await
    }

    /// Sets or clears the joining date of a group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::Repository`] when the group does not
    /// exist or persistence fails.
    pub async fn set_joining_date(
        &self,
        task_group_id: TaskGroupId,
        joining_date: Option<NaiveDate>,
    ) -> PipelineServiceResult<TaskGroup> {
        self.modify_group("set_joining_date", task_group_id, |group, clock| {
            group.set_joining_date(joining_date, clock);
        })
        .await
    }

    async fn load_history(
        &self,
        operation: &'static str,
        task_group_id: TaskGroupId,
    ) -> PipelineServiceResult<TaskGroupHistory> {
        self.repository
            .history(task_group_id)
            .await?
            .ok_or_else(|| {
                PipelineRepositoryError::not_found(operation, "task_group", task_group_id.value())
                    .into()
            })
    }

    async fn modify_group<F>(
        &self,
        operation: &'static str,
        task_group_id: TaskGroupId,
        mutate: F,
    ) -> PipelineServiceResult<TaskGroup>
    where
        F: FnOnce(&mut TaskGroup, &C) + Send,
    {
        let mut group = self
            .repository
            .find_group(task_group_id)
            .await?
            .ok_or_else(|| {
                PipelineRepositoryError::not_found(operation, "task_group", task_group_id.value())
            })?;
        mutate(&mut group, &*self.clock);
        self.repository.update_group(&group).await?;
        tracing::debug!(task_group_id = %task_group_id, operation, "task group metadata updated");
        Ok(group)
    }
}

/// Decides which satellites accompany an append.
///
/// Evaluation notes are kept only when the linkage requires them; a
/// questionnaire token is minted whenever one is required.
fn link_satellites(
    task_group_id: Option<TaskGroupId>,
    phase: Phase,
    requirements: SatelliteRequirements,
    evaluation: Option<EvaluationInput>,
) -> Result<TaskSatellites, PipelineDomainError> {
    let linked_evaluation = match (requirements.evaluation_point, evaluation) {
        (true, Some(input)) => Some(input),
        (true, None) => {
            return Err(PipelineDomainError::EvaluationPointRequired {
                task_group_id,
                phase,
            });
        }
        (false, Some(_)) => {
            tracing::debug!(
                task_group_id = ?task_group_id,
                phase = %phase,
                "evaluation notes ignored for a phase without an evaluated step"
            );
            None
        }
        (false, None) => None,
    };
    Ok(TaskSatellites {
        evaluation: linked_evaluation,
        questionnaire_token: requirements.questionnaire.then(Uuid::new_v4),
    })
}
