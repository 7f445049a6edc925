//! Shared world state for performance time-basis BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, timestamp};
use recruitflow::config::PipelineConfig;
use recruitflow::performance::{
    adapters::memory::InMemoryInterviewTimelineRepository, services::PerformanceService,
};
use recruitflow::pipeline::{
    adapters::memory::InMemoryPipelineRepository,
    domain::{AgentId, JobInformationId, JobSeekerId, StaffId, TaskGroupId},
    services::PipelineService,
};
use rstest::fixture;

/// Pipeline service type used by the BDD world.
pub type TestPipelineService = PipelineService<InMemoryPipelineRepository, ManualClock>;

/// Reporting service type used by the BDD world.
pub type TestPerformanceService =
    PerformanceService<InMemoryPipelineRepository, InMemoryInterviewTimelineRepository>;

/// Agency whose CA-side performance is measured.
pub const AGENCY: AgentId = AgentId::new(1);
/// Job seeker of the scenario candidacy.
pub const SEEKER: JobSeekerId = JobSeekerId::new(7);
/// Posting of the scenario candidacy.
pub const POSTING: JobInformationId = JobInformationId::new(70);
/// CA-side staff member recording tasks.
pub const STAFF: StaffId = StaffId::new(11);

/// Scenario world for performance time-basis behaviour tests.
pub struct PerformanceWorld {
    pub clock: Arc<ManualClock>,
    pub timelines: Arc<InMemoryInterviewTimelineRepository>,
    pub lifecycle: TestPipelineService,
    pub reports: TestPerformanceService,
    pub task_group_id: Option<TaskGroupId>,
    pub last_count: Option<u64>,
}

impl PerformanceWorld {
    /// Creates a world with one registered job seeker and posting.
    #[must_use]
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        let clock = Arc::new(ManualClock::at(
            timestamp("2024-01-05T00:00:00Z").expect("valid fixture timestamp"),
        ));
        let pipeline = Arc::new(InMemoryPipelineRepository::new());
        pipeline
            .register_job_seeker(SEEKER, AGENCY, Some(STAFF))
            .expect("seeker registration should succeed");
        pipeline
            .register_job_information(POSTING, AgentId::new(2), None)
            .expect("posting registration should succeed");
        let timelines = Arc::new(InMemoryInterviewTimelineRepository::new());

        Self {
            lifecycle: PipelineService::new(Arc::clone(&pipeline), Arc::clone(&clock), config),
            reports: PerformanceService::new(pipeline, Arc::clone(&timelines), &config),
            clock,
            timelines,
            task_group_id: None,
            last_count: None,
        }
    }
}

impl Default for PerformanceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PerformanceWorld {
    PerformanceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
