//! Task log entries and the descriptive data they carry.

use super::{ParseStaffTypeError, Phase, StaffId, TaskGroupId, TaskId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Side of the agency pairing that executed a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffType {
    /// Candidate-side agent (owns the job seeker).
    Ca,
    /// Recruiting-side agent (owns the employer relationship).
    Ra,
}

impl StaffType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ca => "ca",
            Self::Ra => "ra",
        }
    }
}

impl TryFrom<&str> for StaffType {
    type Error = ParseStaffTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ca" => Ok(Self::Ca),
            "ra" => Ok(Self::Ra),
            _ => Err(ParseStaffTypeError(value.to_owned())),
        }
    }
}

/// Descriptive service-level deadline.
///
/// Deadlines annotate a task; nothing fires when they pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Deadline {
    /// Deadline day.
    pub day: Option<NaiveDate>,
    /// Deadline time of day.
    pub time: Option<NaiveTime>,
}

impl Deadline {
    /// Creates a deadline on a day with an optional time.
    #[must_use]
    pub const fn on(day: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self {
            day: Some(day),
            time,
        }
    }

    /// Orders deadlines nearest-first with missing parts sorted last.
    #[must_use]
    pub fn urgency_cmp(&self, other: &Self) -> Ordering {
        missing_last(self.day, other.day).then_with(|| missing_last(self.time, other.time))
    }
}

fn missing_last<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descriptive fields of a task.
///
/// These are the only fields that may change after insertion, and only on
/// the latest task of a group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Service-level deadline.
    pub deadline: Deadline,
    /// Free-form remarks.
    pub remarks: String,
    /// Guidance text sent to the job seeker.
    pub guidance: String,
    /// Condition notes (salary, start date, and similar).
    pub condition_note: String,
    /// Whether the double-sided alliance was checked for this step.
    pub is_check_double_sided: bool,
}

impl TaskDetails {
    /// Sets the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Sets guidance text.
    #[must_use]
    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.guidance = guidance.into();
        self
    }

    /// Sets condition notes.
    #[must_use]
    pub fn with_condition_note(mut self, note: impl Into<String>) -> Self {
        self.condition_note = note.into();
        self
    }

    /// Marks the double-sided check.
    #[must_use]
    pub fn with_double_sided_check(mut self, checked: bool) -> Self {
        self.is_check_double_sided = checked;
        self
    }
}

/// A phase transition awaiting insertion into the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    phase: Phase,
    staff_type: StaffType,
    executed_staff_id: StaffId,
    details: TaskDetails,
    created_at: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        phase: Phase,
        staff_type: StaffType,
        executed_staff_id: StaffId,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Self {
        Self {
            phase,
            staff_type,
            executed_staff_id,
            details,
            created_at: clock.utc(),
        }
    }

    /// Returns the phase being recorded.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the executing side.
    #[must_use]
    pub const fn staff_type(&self) -> StaffType {
        self.staff_type
    }

    /// Returns the executing staff member.
    #[must_use]
    pub const fn executed_staff_id(&self) -> StaffId {
        self.executed_staff_id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Binds the draft to its store-assigned identity.
    #[must_use]
    pub fn into_task(self, id: TaskId, task_group_id: TaskGroupId) -> Task {
        Task {
            id,
            task_group_id,
            phase: self.phase,
            staff_type: self.staff_type,
            executed_staff_id: self.executed_staff_id,
            details: self.details,
            created_at: self.created_at,
        }
    }
}

/// Append-only phase-transition record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    task_group_id: TaskGroupId,
    phase: Phase,
    staff_type: StaffType,
    executed_staff_id: StaffId,
    details: TaskDetails,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning group.
    pub task_group_id: TaskGroupId,
    /// Persisted phase.
    pub phase: Phase,
    /// Executing side.
    pub staff_type: StaffType,
    /// Executing staff member.
    pub executed_staff_id: StaffId,
    /// Descriptive fields.
    pub details: TaskDetails,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_group_id: data.task_group_id,
            phase: data.phase,
            staff_type: data.staff_type,
            executed_staff_id: data.executed_staff_id,
            details: data.details,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning group.
    #[must_use]
    pub const fn task_group_id(&self) -> TaskGroupId {
        self.task_group_id
    }

    /// Returns the recorded phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the executing side.
    #[must_use]
    pub const fn staff_type(&self) -> StaffType {
        self.staff_type
    }

    /// Returns the executing staff member.
    #[must_use]
    pub const fn executed_staff_id(&self) -> StaffId {
        self.executed_staff_id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.details.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy carrying replacement descriptive fields.
    ///
    /// Phase, identity, and timestamps are preserved.
    #[must_use]
    pub fn with_details(&self, details: TaskDetails) -> Self {
        Self {
            details,
            ..self.clone()
        }
    }
}
