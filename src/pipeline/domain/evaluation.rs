//! Satellite records attached to individual tasks.

use super::{
    EvaluationPointId, JobSeekerId, ParseVerdictError, SelectionQuestionnaireId, TaskId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome recorded on an evaluation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationVerdict {
    /// No verdict recorded yet.
    #[default]
    Pending,
    /// The job seeker passed the step.
    Pass,
    /// The job seeker failed the step.
    Fail,
    /// The employer asked for another interview.
    ReInterview,
}

impl EvaluationVerdict {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::ReInterview => "re_interview",
        }
    }
}

impl TryFrom<&str> for EvaluationVerdict {
    type Error = ParseVerdictError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "re_interview" => Ok(Self::ReInterview),
            _ => Err(ParseVerdictError(value.to_owned())),
        }
    }
}

/// Evaluation notes supplied alongside a task append.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Positive observations.
    pub good_points: String,
    /// Negative observations.
    pub bad_points: String,
    /// Recorded verdict.
    pub verdict: EvaluationVerdict,
}

/// Good/bad notes and verdict for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPoint {
    /// Store-assigned identifier.
    pub id: EvaluationPointId,
    /// Task this evaluation belongs to.
    pub task_id: TaskId,
    /// Notes and verdict.
    pub input: EvaluationInput,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Pending post-step questionnaire for the job seeker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionQuestionnaire {
    /// Store-assigned identifier.
    pub id: SelectionQuestionnaireId,
    /// Task that triggered the questionnaire.
    pub task_id: TaskId,
    /// Job seeker expected to answer.
    pub job_seeker_id: JobSeekerId,
    /// Token embedded in the link sent to the job seeker.
    pub access_token: Uuid,
    /// Whether the questionnaire has been answered.
    pub is_answered: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Satellite records to insert atomically with a task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskSatellites {
    /// Evaluation point to create for the task.
    pub evaluation: Option<EvaluationInput>,
    /// Questionnaire token to issue, when one is required.
    pub questionnaire_token: Option<Uuid>,
}

/// Result of an append: the stored task and any satellites created with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedTask {
    /// Stored task.
    pub task: super::Task,
    /// Evaluation point created in the same unit.
    pub evaluation_point: Option<EvaluationPoint>,
    /// Questionnaire created in the same unit.
    pub questionnaire: Option<SelectionQuestionnaire>,
}
