//! Dual-actor ownership and visibility rules.
//!
//! Every group has a CA side (the agency owning the job seeker) and an RA
//! side (the agency owning the employer). The CA side always sees the full
//! group. The RA side sees the full group only when the group is
//! double-sided, meaning both agencies are in an alliance permitting mutual
//! visibility; otherwise it sees a summary with descriptive text redacted.

use super::{
    AgentId, Deadline, JobInformationId, JobSeekerId, Phase, StaffId, StaffType, Task, TaskGroup,
    TaskGroupId, TaskId,
};
use serde::{Deserialize, Serialize};

/// Agencies and staff owning both sides of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ownership {
    /// Agency owning the job seeker.
    pub ca_agent_id: AgentId,
    /// Staff member handling the job seeker.
    pub ca_staff_id: Option<StaffId>,
    /// Agency owning the employer.
    pub ra_agent_id: AgentId,
    /// Staff member handling the employer.
    pub ra_staff_id: Option<StaffId>,
}

impl Ownership {
    /// Returns the agency on the given side.
    #[must_use]
    pub const fn agent(&self, side: StaffType) -> AgentId {
        match side {
            StaffType::Ca => self.ca_agent_id,
            StaffType::Ra => self.ra_agent_id,
        }
    }

    /// Returns the staff member on the given side.
    #[must_use]
    pub const fn staff(&self, side: StaffType) -> Option<StaffId> {
        match side {
            StaffType::Ca => self.ca_staff_id,
            StaffType::Ra => self.ra_staff_id,
        }
    }

    /// Returns `true` when the two agencies sit on opposite sides of the
    /// group, in either direction.
    #[must_use]
    pub fn pairs(&self, first: AgentId, second: AgentId) -> bool {
        (self.ca_agent_id == first && self.ra_agent_id == second)
            || (self.ca_agent_id == second && self.ra_agent_id == first)
    }
}

/// A group with its latest task and ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineEntry {
    /// Group metadata.
    pub group: TaskGroup,
    /// Task with the greatest identifier in the group.
    pub latest: Task,
    /// Ownership of both sides.
    pub ownership: Ownership,
}

/// Level of detail a staff member may see for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffAccess {
    /// Full group detail.
    Full,
    /// Phase and deadline only.
    Summary,
    /// Not visible.
    None,
}

impl StaffAccess {
    /// Resolves the access level of `staff_id` for a group.
    #[must_use]
    pub fn resolve(staff_id: StaffId, ownership: &Ownership, is_double_sided: bool) -> Self {
        if ownership.ca_staff_id == Some(staff_id) {
            return Self::Full;
        }
        if ownership.ra_staff_id == Some(staff_id) {
            return if is_double_sided {
                Self::Full
            } else {
                Self::Summary
            };
        }
        Self::None
    }

    /// Resolves the access level of `staff_id` for an entry.
    #[must_use]
    pub fn for_entry(staff_id: StaffId, entry: &PipelineEntry) -> Self {
        Self::resolve(staff_id, &entry.ownership, entry.group.is_double_sided())
    }
}

/// Projection of an entry for a particular staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineView {
    /// Group identifier.
    pub task_group_id: TaskGroupId,
    /// Latest task identifier.
    pub task_id: TaskId,
    /// Job seeker of the pairing.
    pub job_seeker_id: JobSeekerId,
    /// Posting of the pairing.
    pub job_information_id: JobInformationId,
    /// Current phase.
    pub phase: Phase,
    /// Current deadline.
    pub deadline: Deadline,
    /// Access level the view was built for.
    pub access: StaffAccess,
    /// Remarks, redacted for summary access.
    pub remarks: Option<String>,
    /// Guidance text, redacted for summary access.
    pub guidance: Option<String>,
    /// Condition notes, redacted for summary access.
    pub condition_note: Option<String>,
}

impl PipelineView {
    /// Projects an entry for `staff_id`, or `None` when it is not visible.
    #[must_use]
    pub fn project(entry: &PipelineEntry, staff_id: StaffId) -> Option<Self> {
        let access = StaffAccess::for_entry(staff_id, entry);
        let details = entry.latest.details();
        let reveal = |text: &String| (access == StaffAccess::Full).then(|| text.clone());
        match access {
            StaffAccess::None => None,
            StaffAccess::Full | StaffAccess::Summary => Some(Self {
                task_group_id: entry.group.id(),
                task_id: entry.latest.id(),
                job_seeker_id: entry.group.job_seeker_id(),
                job_information_id: entry.group.job_information_id(),
                phase: entry.latest.phase(),
                deadline: entry.latest.deadline(),
                access,
                remarks: reveal(&details.remarks),
                guidance: reveal(&details.guidance),
                condition_note: reveal(&details.condition_note),
            }),
        }
    }
}
