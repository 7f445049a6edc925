//! Unit tests for performance reporting.


use crate::pipeline::domain::{
    AgentId, JobInformationId, JobSeekerId, Ownership, PersistedTaskData, PersistedTaskGroupData,
    Phase, SideActivity, StaffId, StaffType, Task, TaskDetails, TaskGroup, TaskGroupHistory,
    TaskGroupId, TaskId,
};
use crate::pipeline::ports::OwnedHistory;
use chrono::{DateTime, TimeZone, Utc};

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// Builds a history for `job_seeker_id` from `(task id, phase, recorded at)`
/// rows.
fn history(
    group_id: i64,
    job_seeker_id: i64,
    rows: &[(i64, Phase, DateTime<Utc>)],
) -> TaskGroupHistory {
    let group = TaskGroup::from_persisted(PersistedTaskGroupData {
        id: TaskGroupId::new(group_id),
        job_seeker_id: JobSeekerId::new(job_seeker_id),
        job_information_id: JobInformationId::new(500 + group_id),
        selection_flow_pattern_id: None,
        is_double_sided: false,
        is_self_application: false,
        joining_date: None,
        activity: SideActivity::default(),
        external: None,
        created_at: utc(2024, 1, 1, 0),
        updated_at: utc(2024, 1, 1, 0),
    });
    let tasks = rows
        .iter()
        .map(|&(id, phase, created_at)| {
            Task::from_persisted(PersistedTaskData {
                id: TaskId::new(id),
                task_group_id: TaskGroupId::new(group_id),
                phase,
                staff_type: StaffType::Ca,
                executed_staff_id: StaffId::new(11),
                details: TaskDetails::default(),
                created_at,
            })
        })
        .collect();
    TaskGroupHistory::new(group, tasks).expect("test history should assemble")
}

/// CA agency 1 (staff 11) against RA agency 2 (staff 22).
fn owned(history: TaskGroupHistory) -> OwnedHistory {
    OwnedHistory {
        history,
        ownership: Ownership {
            ca_agent_id: AgentId::new(1),
            ca_staff_id: Some(StaffId::new(11)),
            ra_agent_id: AgentId::new(2),
            ra_staff_id: Some(StaffId::new(22)),
        },
    }
}
