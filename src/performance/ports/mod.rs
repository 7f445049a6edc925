//! Port contracts for performance reporting.

pub mod timeline;

#[cfg(test)]
pub use timeline::MockInterviewTimelineRepository;
pub use timeline::InterviewTimelineRepository;
