//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use recruitflow::pipeline::adapters::postgres::PipelinePgPool;
use recruitflow::pipeline::domain::{
    AgentId, JobInformationId, JobSeekerId, NewTaskGroup, Phase, PhaseCategory, StaffId,
    StaffType, TaskDetails, TaskDraft, step,
};
use mockable::Clock;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Boxed error used by helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "RECRUITFLOW_TEST_DATABASE_URL";

/// SQL creating the pipeline tables.
pub const CREATE_PIPELINE_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_pipeline_tables/up.sql");

/// SQL dropping the pipeline tables.
pub const DROP_PIPELINE_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_pipeline_tables/down.sql");

/// SQL creating the interview timeline table.
pub const CREATE_TIMELINES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000001_create_interview_timelines/up.sql");

/// SQL dropping the interview timeline table.
pub const DROP_TIMELINES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000001_create_interview_timelines/down.sql");

/// Ownership rows every test starts with.
const SEED_OWNERSHIP_SQL: &str = "
    INSERT INTO job_seekers (id, agent_id, agent_staff_id) VALUES (100, 1, 11), (101, 1, 11);
    INSERT INTO job_informations (id, agent_id, agent_staff_id) VALUES (200, 2, 22), (201, 2, NULL);
";

/// Candidate-side agency of the seed data.
pub const CA_AGENT: AgentId = AgentId::new(1);
/// Staff member handling the seeded job seekers.
pub const CA_STAFF: StaffId = StaffId::new(11);
/// Staff member handling posting 200.
pub const RA_STAFF: StaffId = StaffId::new(22);
/// Seeded job seekers.
pub const SEEKER_A: JobSeekerId = JobSeekerId::new(100);
/// Seeded job seekers.
pub const SEEKER_B: JobSeekerId = JobSeekerId::new(101);
/// Posting handled by [`RA_STAFF`].
pub const POSTING_X: JobInformationId = JobInformationId::new(200);
/// Posting without an assigned staff member.
pub const POSTING_Y: JobInformationId = JobInformationId::new(201);

static SCHEMA_LOCK: Mutex<()> = Mutex::new(());

/// A freshly migrated database held exclusively by one test.
pub struct TestDatabase {
    pub pool: PipelinePgPool,
    _lock: MutexGuard<'static, ()>,
}

/// Rebuilds the schema and returns a pool, or `None` when no database is
/// configured.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub fn test_database() -> Result<Option<TestDatabase>, BoxError> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };
    let lock = SCHEMA_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let mut connection = PgConnection::establish(&url)?;
    connection.batch_execute(DROP_TIMELINES_SQL)?;
    connection.batch_execute(DROP_PIPELINE_SQL)?;
    connection.batch_execute(CREATE_PIPELINE_SQL)?;
    connection.batch_execute(CREATE_TIMELINES_SQL)?;
    connection.batch_execute(SEED_OWNERSHIP_SQL)?;

    let pool = Pool::builder()
        .max_size(4)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    Ok(Some(TestDatabase { pool, _lock: lock }))
}

/// Clock frozen at a fixed instant; Postgres keeps microseconds only.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.0.with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns a fixed clock at the given day of March 2024.
pub fn march(day: u32) -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0)
            .single()
            .unwrap_or_default(),
    )
}

/// Builds a new group for a seeded pairing.
pub fn new_group(job_seeker_id: JobSeekerId, job_information_id: JobInformationId) -> NewTaskGroup {
    NewTaskGroup::new(job_seeker_id, job_information_id, &march(1))
}

/// Builds a CA-side draft at `phase` recorded on the given day of March.
pub fn draft(phase: Phase, day: u32) -> TaskDraft {
    TaskDraft::new(phase, StaffType::Ca, CA_STAFF, TaskDetails::default(), &march(day))
}

/// The first step of every candidacy.
pub const fn introduced() -> Phase {
    Phase::ongoing(PhaseCategory::JobIntroduction, step::introduction::INTRODUCED)
}

/// A scheduled first-round interview.
pub const fn scheduled() -> Phase {
    Phase::ongoing(PhaseCategory::FirstSelection, step::selection::SCHEDULED)
}
