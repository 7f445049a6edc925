//! Unit tests for the recruitment pipeline.


use crate::pipeline::domain::{
    AgentId, Deadline, JobInformationId, JobSeekerId, Ownership, PersistedTaskData,
    PersistedTaskGroupData, Phase, PhaseCategory, PipelineEntry, SideActivity, StaffId,
    StaffType, SubPhase, Task, TaskDetails, TaskGroup, TaskGroupId, TaskId,
};
use chrono::{DateTime, TimeZone, Utc};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0)
        .single()
        .expect("valid test timestamp")
}

fn ongoing(category: PhaseCategory, step: SubPhase) -> Phase {
    Phase::ongoing(category, step)
}

fn group(id: i64, job_seeker_id: i64, is_double_sided: bool) -> TaskGroup {
    TaskGroup::from_persisted(PersistedTaskGroupData {
        id: TaskGroupId::new(id),
        job_seeker_id: JobSeekerId::new(job_seeker_id),
        job_information_id: JobInformationId::new(100 + id),
        selection_flow_pattern_id: None,
        is_double_sided,
        is_self_application: false,
        joining_date: None,
        activity: SideActivity::default(),
        external: None,
        created_at: at(1, 9),
        updated_at: at(1, 9),
    })
}

fn task(id: i64, task_group_id: i64, phase: Phase) -> Task {
    task_with(id, task_group_id, phase, TaskDetails::default())
}

fn task_with(id: i64, task_group_id: i64, phase: Phase, details: TaskDetails) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        task_group_id: TaskGroupId::new(task_group_id),
        phase,
        staff_type: StaffType::Ca,
        executed_staff_id: StaffId::new(1),
        details,
        created_at: at(2, 9),
    })
}

/// CA agency 1 with staff 11, RA agency 2 with staff 22.
fn ownership() -> Ownership {
    Ownership {
        ca_agent_id: AgentId::new(1),
        ca_staff_id: Some(StaffId::new(11)),
        ra_agent_id: AgentId::new(2),
        ra_staff_id: Some(StaffId::new(22)),
    }
}

fn entry(latest: Task, is_double_sided: bool) -> PipelineEntry {
    let group_id = latest.task_group_id().value();
    PipelineEntry {
        group: group(group_id, group_id, is_double_sided),
        latest,
        ownership: ownership(),
    }
}

fn deadline_on(day: u32) -> Deadline {
    Deadline::on(at(day, 0).date_naive(), None)
}
