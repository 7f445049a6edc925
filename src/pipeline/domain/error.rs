//! Error types for pipeline domain validation and parsing.

use super::{Phase, TaskGroupId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or validating pipeline values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineDomainError {
    /// The raw phase category is outside `0..=9`.
    #[error("invalid phase category {0}, expected 0..=9")]
    InvalidPhaseCategory(i32),

    /// The raw sub-category cannot be represented under its category.
    #[error("invalid sub-category {sub_category} for phase category {category}")]
    InvalidSubPhase {
        /// Raw phase category.
        category: i32,
        /// Raw sub-category.
        sub_category: i32,
    },

    /// The step value is reserved for terminal or closed outcomes.
    #[error("sub-category {0} is reserved for terminal or closed outcomes")]
    ReservedSubPhase(u16),

    /// The transition is not a legal edge under the active policy.
    #[error("illegal transition for task group {task_group_id}: {from} -> {to}")]
    IllegalTransition {
        /// Group whose pipeline would advance.
        task_group_id: TaskGroupId,
        /// Current phase of the group.
        from: Phase,
        /// Requested phase.
        to: Phase,
    },

    /// The selection flow requires an evaluation point for this phase.
    #[error("an evaluation point is required for {phase}")]
    EvaluationPointRequired {
        /// Group the task was appended to; `None` when the task opens the group.
        task_group_id: Option<TaskGroupId>,
        /// Phase that mapped to an evaluated step.
        phase: Phase,
    },

    /// Only the latest task of a group accepts descriptive edits.
    #[error("task {task_id} is not the latest task of group {task_group_id} (latest is {latest_id})")]
    NotLatestTask {
        /// Group that owns the task.
        task_group_id: TaskGroupId,
        /// Task the caller attempted to edit.
        task_id: TaskId,
        /// Current latest task of the group.
        latest_id: TaskId,
    },

    /// A task history was assembled without any task.
    #[error("task group {0} has no tasks")]
    EmptyHistory(TaskGroupId),

    /// A task history contained a task from another group.
    #[error("task {task_id} does not belong to task group {task_group_id}")]
    ForeignTask {
        /// Group being assembled.
        task_group_id: TaskGroupId,
        /// Offending task.
        task_id: TaskId,
    },
}

/// Error returned while parsing staff types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown staff type: {0}")]
pub struct ParseStaffTypeError(pub String);

/// Error returned while parsing evaluation verdicts from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown evaluation verdict: {0}")]
pub struct ParseVerdictError(pub String);
