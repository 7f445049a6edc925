//! Whose performance a report measures.

use crate::pipeline::domain::{AgentId, Ownership, StaffId, StaffType};
use serde::{Deserialize, Serialize};

/// Agency or staff member being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceSubject {
    /// A whole agency.
    Agent(AgentId),
    /// A single staff member.
    Staff(StaffId),
}

/// Subject plus the side of the pairing it is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerformanceScope {
    /// Agency or staff member.
    pub subject: PerformanceSubject,
    /// CA side (job seeker owner) or RA side (employer owner).
    pub side: StaffType,
}

impl PerformanceScope {
    /// Scopes a report to an agency on one side.
    #[must_use]
    pub const fn agent(agent_id: AgentId, side: StaffType) -> Self {
        Self {
            subject: PerformanceSubject::Agent(agent_id),
            side,
        }
    }

    /// Scopes a report to a staff member on one side.
    #[must_use]
    pub const fn staff(staff_id: StaffId, side: StaffType) -> Self {
        Self {
            subject: PerformanceSubject::Staff(staff_id),
            side,
        }
    }

    /// Returns `true` when the group's ownership falls inside the scope.
    #[must_use]
    pub fn matches(&self, ownership: &Ownership) -> bool {
        match self.subject {
            PerformanceSubject::Agent(agent_id) => ownership.agent(self.side) == agent_id,
            PerformanceSubject::Staff(staff_id) => ownership.staff(self.side) == Some(staff_id),
        }
    }
}
