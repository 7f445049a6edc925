//! Identifier types for the recruitment pipeline domain.
//!
//! Pipeline records are keyed by store-assigned integers. Task identifiers
//! double as the event order of the task log, so they are totally ordered.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw store identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

store_id! {
    /// Identifier of a task group (one job seeker × job posting pairing).
    TaskGroupId
}

store_id! {
    /// Identifier of a task log entry.
    ///
    /// Assignment order equals event order within the log.
    TaskId
}

store_id! {
    /// Identifier of a job seeker owned by a CA-side agency.
    JobSeekerId
}

store_id! {
    /// Identifier of a job posting owned by an RA-side agency.
    JobInformationId
}

store_id! {
    /// Identifier of an agency staff member.
    StaffId
}

store_id! {
    /// Identifier of an agency.
    AgentId
}

store_id! {
    /// Identifier of a selection-flow template.
    SelectionFlowPatternId
}

store_id! {
    /// Identifier of an evaluation point attached to a task.
    EvaluationPointId
}

store_id! {
    /// Identifier of a post-step candidate questionnaire.
    SelectionQuestionnaireId
}

store_id! {
    /// Identifier of an interview timeline record.
    InterviewTimelineId
}
