//! Given steps for performance time-basis BDD scenarios.

use super::world::{POSTING, PerformanceWorld, SEEKER, STAFF, run_async};
use crate::test_helpers::timestamp;
use chrono::NaiveDate;
use eyre::WrapErr;
use recruitflow::performance::{domain::NewInterviewTimeline, ports::InterviewTimelineRepository};
use recruitflow::pipeline::{
    domain::{Phase, PhaseCategory, StaffType, step},
    services::{StartCandidacyRequest, TaskRequest},
};
use rstest_bdd_macros::given;

fn named_phase(name: &str) -> Result<Phase, eyre::Report> {
    match name {
        "seeker consent" => Ok(Phase::ongoing(
            PhaseCategory::Recommendation,
            step::recommendation::SEEKER_CONSENT,
        )),
        "recommendation" => Ok(Phase::ongoing(
            PhaseCategory::Recommendation,
            step::recommendation::RECOMMENDED,
        )),
        "preparing recommendation" => Ok(Phase::ongoing(
            PhaseCategory::JobIntroduction,
            step::introduction::PREPARING_RECOMMENDATION,
        )),
        "offer" => Ok(Phase::ongoing(PhaseCategory::Offer, step::offer::OFFERED)),
        other => Err(eyre::eyre!("unknown phase name in scenario: {other}")),
    }
}

fn open_candidacy(world: &mut PerformanceWorld, first_phase: Phase) -> Result<(), eyre::Report> {
    let first_task = TaskRequest::new(first_phase, StaffType::Ca, STAFF);
    let history = run_async(
        world
            .lifecycle
            .start_candidacy(StartCandidacyRequest::new(SEEKER, POSTING, first_task)),
    )
    .wrap_err("start candidacy for performance scenario")?;
    world.task_group_id = Some(history.group().id());
    Ok(())
}

#[given("a candidacy between a job seeker and a posting")]
fn candidacy_exists(world: &mut PerformanceWorld) -> Result<(), eyre::Report> {
    open_candidacy(
        world,
        Phase::ongoing(PhaseCategory::JobIntroduction, step::introduction::INTRODUCED),
    )
}

#[given(r#"a candidacy that opens with "{phase}" at "{opened_at}""#)]
fn candidacy_opens_with(
    world: &mut PerformanceWorld,
    phase: String,
    opened_at: String,
) -> Result<(), eyre::Report> {
    world.clock.set(timestamp(&opened_at)?);
    open_candidacy(world, named_phase(&phase)?)
}

#[given(r#"the job seeker's first interview is on "{date}""#)]
fn first_interview_on(world: &mut PerformanceWorld, date: String) -> Result<(), eyre::Report> {
    let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .wrap_err_with(|| format!("invalid interview date {date}"))?;
    run_async(world.timelines.store(NewInterviewTimeline {
        job_seeker_id: SEEKER,
        first_interview_date: Some(parsed),
        interview_date: None,
    }))
    .wrap_err("store interview timeline")?;
    Ok(())
}

#[given(r#"the candidacy records "{phase}" at "{recorded_at}""#)]
fn candidacy_records(
    world: &mut PerformanceWorld,
    phase: String,
    recorded_at: String,
) -> Result<(), eyre::Report> {
    let task_group_id = world
        .task_group_id
        .ok_or_else(|| eyre::eyre!("missing candidacy in scenario world"))?;
    world.clock.set(timestamp(&recorded_at)?);
    let request = TaskRequest::new(named_phase(&phase)?, StaffType::Ca, STAFF);
    run_async(world.lifecycle.append_task(task_group_id, request))
        .wrap_err_with(|| format!("record {phase} at {recorded_at}"))?;
    Ok(())
}
