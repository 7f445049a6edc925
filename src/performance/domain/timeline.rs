//! Interview timelines recorded per job seeker.

use crate::pipeline::domain::{InterviewTimelineId, JobSeekerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Interview dates recorded for a job seeker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTimeline {
    /// Store-assigned identifier; later records supersede earlier ones.
    pub id: InterviewTimelineId,
    /// Job seeker the dates belong to.
    pub job_seeker_id: JobSeekerId,
    /// Date of the first interview.
    pub first_interview_date: Option<NaiveDate>,
    /// Date of the most recent interview.
    pub interview_date: Option<NaiveDate>,
}

impl InterviewTimeline {
    /// Returns the date used for interview-month attribution.
    #[must_use]
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.first_interview_date.or(self.interview_date)
    }
}

/// Timeline awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInterviewTimeline {
    /// Job seeker the dates belong to.
    pub job_seeker_id: JobSeekerId,
    /// Date of the first interview.
    pub first_interview_date: Option<NaiveDate>,
    /// Date of the most recent interview.
    pub interview_date: Option<NaiveDate>,
}

/// Resolves each seeker's interview date from the highest-id timeline.
///
/// Seekers whose latest timeline carries no date are left out.
#[must_use]
pub fn interview_dates(timelines: &[InterviewTimeline]) -> HashMap<JobSeekerId, NaiveDate> {
    let mut latest: HashMap<JobSeekerId, &InterviewTimeline> = HashMap::new();
    for timeline in timelines {
        latest
            .entry(timeline.job_seeker_id)
            .and_modify(|current| {
                if timeline.id > current.id {
                    *current = timeline;
                }
            })
            .or_insert(timeline);
    }
    latest
        .into_iter()
        .filter_map(|(seeker, timeline)| timeline.effective_date().map(|date| (seeker, date)))
        .collect()
}
