//! Repository port for task groups, the task log, and selection flows.

use crate::pipeline::domain::{
    AgentId, AppendedTask, EvaluationPoint, JobInformationId, JobSeekerId, NewSelectionFlowPattern,
    NewTaskGroup, Ownership, PipelineEntry, SelectionFlowPattern, SelectionFlowPatternId,
    SelectionQuestionnaire, StaffId, Task, TaskDetails, TaskDraft, TaskGroup, TaskGroupHistory,
    TaskGroupId, TaskId, TaskSatellites,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pipeline repository operations.
pub type PipelineRepositoryResult<T> = Result<T, PipelineRepositoryError>;

/// Which groups a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryScope {
    /// Every group.
    All,
    /// Groups of one job seeker.
    JobSeeker(JobSeekerId),
    /// Groups where the staff member handles either side.
    Staff(StaffId),
    /// Groups where the agency sits on either side.
    Agent(AgentId),
}

/// A task history with the ownership of both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedHistory {
    /// Group and ordered task log.
    pub history: TaskGroupHistory,
    /// Ownership of both sides.
    pub ownership: Ownership,
}

/// Pipeline persistence contract.
///
/// Implementations assign monotonically increasing identifiers; the task
/// identifier order is the only event order the resolver relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    /// Stores a group together with its first task and that task's
    /// satellites as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::ConstraintViolation`] when the job
    /// seeker or posting is unknown, the pairing already has a group, or a
    /// satellite is rejected. Nothing is stored in that case.
    async fn create_group(
        &self,
        group: NewTaskGroup,
        first_task: TaskDraft,
        satellites: TaskSatellites,
    ) -> PipelineRepositoryResult<TaskGroupHistory>;

    /// Appends a task and its satellites to a group as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::NotFound`] when the group does not
    /// exist and [`PipelineRepositoryError::ConstraintViolation`] when a
    /// satellite is rejected, in which case the task is not stored either.
    async fn append_task(
        &self,
        task_group_id: TaskGroupId,
        draft: TaskDraft,
        satellites: TaskSatellites,
    ) -> PipelineRepositoryResult<AppendedTask>;

    /// Replaces the descriptive fields of the latest task of its group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::NotFound`] when the task does not
    /// exist and [`PipelineRepositoryError::ConstraintViolation`] when it is
    /// not the latest task of its group.
    async fn update_latest_task(
        &self,
        task_id: TaskId,
        details: TaskDetails,
    ) -> PipelineRepositoryResult<Task>;

    /// Persists group metadata (timestamps, flags, flow assignment).
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::NotFound`] when the group does not
    /// exist.
    async fn update_group(&self, group: &TaskGroup) -> PipelineRepositoryResult<()>;

    /// Finds a group by identifier.
    async fn find_group(&self, id: TaskGroupId) -> PipelineRepositoryResult<Option<TaskGroup>>;

    /// Finds the group of a job seeker × posting pairing.
    async fn find_group_by_pair(
        &self,
        job_seeker_id: JobSeekerId,
        job_information_id: JobInformationId,
    ) -> PipelineRepositoryResult<Option<TaskGroup>>;

    /// Returns the groups with the given identifiers.
    ///
    /// An empty slice returns an empty list without querying.
    async fn find_groups_by_ids(
        &self,
        ids: &[TaskGroupId],
    ) -> PipelineRepositoryResult<Vec<TaskGroup>>;

    /// Returns the tasks with the given identifiers in log order.
    ///
    /// An empty slice returns an empty list without querying.
    async fn find_tasks_by_ids(&self, ids: &[TaskId]) -> PipelineRepositoryResult<Vec<Task>>;

    /// Loads a group with its whole task log.
    async fn history(
        &self,
        id: TaskGroupId,
    ) -> PipelineRepositoryResult<Option<TaskGroupHistory>>;

    /// Returns the latest task of every group in scope.
    async fn latest_entries(
        &self,
        scope: EntryScope,
    ) -> PipelineRepositoryResult<Vec<PipelineEntry>>;

    /// Returns the whole log of every group in scope.
    async fn histories(&self, scope: EntryScope) -> PipelineRepositoryResult<Vec<OwnedHistory>>;

    /// Finds the evaluation point attached to a task.
    async fn find_evaluation_point(
        &self,
        task_id: TaskId,
    ) -> PipelineRepositoryResult<Option<EvaluationPoint>>;

    /// Finds the questionnaire issued for a task.
    async fn find_questionnaire(
        &self,
        task_id: TaskId,
    ) -> PipelineRepositoryResult<Option<SelectionQuestionnaire>>;

    /// Stores a selection-flow template.
    async fn store_selection_flow(
        &self,
        pattern: NewSelectionFlowPattern,
    ) -> PipelineRepositoryResult<SelectionFlowPattern>;

    /// Finds a selection-flow template.
    async fn find_selection_flow(
        &self,
        id: SelectionFlowPatternId,
    ) -> PipelineRepositoryResult<Option<SelectionFlowPattern>>;
}

/// Errors returned by pipeline repository implementations.
///
/// Every variant carries the name of the operation that raised it.
#[derive(Debug, Clone, Error)]
pub enum PipelineRepositoryError {
    /// A single-row lookup matched nothing.
    #[error("{operation}: {entity} {id} not found")]
    NotFound {
        /// Originating operation.
        operation: &'static str,
        /// Kind of record.
        entity: &'static str,
        /// Raw identifier looked up.
        id: i64,
    },

    /// The store rejected an insert or update.
    #[error("{operation}: constraint violation: {message}")]
    ConstraintViolation {
        /// Originating operation.
        operation: &'static str,
        /// Store-provided description.
        message: String,
    },

    /// Persistence-layer failure.
    #[error("{operation}: persistence error: {cause}")]
    Persistence {
        /// Originating operation.
        operation: &'static str,
        /// Underlying error.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl PipelineRepositoryError {
    /// Creates a not-found error.
    #[must_use]
    pub const fn not_found(operation: &'static str, entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            operation,
            entity,
            id,
        }
    }

    /// Creates a constraint violation.
    pub fn constraint(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            operation,
            message: message.into(),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            operation,
            cause: Arc::new(err),
        }
    }

    /// Returns the operation that raised the error.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::NotFound { operation, .. }
            | Self::ConstraintViolation { operation, .. }
            | Self::Persistence { operation, .. } => *operation,
        }
    }
}
