//! Domain model for the recruitment pipeline.
//!
//! Candidacies are task groups owning an append-only task log. The pipeline
//! position of a group is derived from the log, never stored, and every
//! infrastructure concern stays outside this boundary.

mod error;
mod evaluation;
mod ids;
mod phase;
pub mod resolver;
mod selection_flow;
mod task;
mod task_group;
mod visibility;

pub use error::{ParseStaffTypeError, ParseVerdictError, PipelineDomainError};
pub use evaluation::{
    AppendedTask, EvaluationInput, EvaluationPoint, EvaluationVerdict, SelectionQuestionnaire,
    TaskSatellites,
};
pub use ids::{
    AgentId, EvaluationPointId, InterviewTimelineId, JobInformationId, JobSeekerId,
    SelectionFlowPatternId, SelectionQuestionnaireId, StaffId, TaskGroupId, TaskId,
};
pub use phase::{
    Phase, PhaseCategory, PhaseOutcome, SubPhase, TerminalReason, TransitionPolicy, step,
};
pub use resolver::ContinuationPolicy;
pub use selection_flow::{
    NewSelectionFlowPattern, SatelliteRequirements, SelectionFlowPattern, SelectionStep,
};
pub use task::{Deadline, PersistedTaskData, StaffType, Task, TaskDetails, TaskDraft};
pub use task_group::{
    ExternalPosting, NewTaskGroup, PersistedTaskGroupData, SideActivity, TaskGroup,
    TaskGroupHistory,
};
pub use visibility::{Ownership, PipelineEntry, PipelineView, StaffAccess};
