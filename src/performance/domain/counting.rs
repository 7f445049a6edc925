//! KPI counting over task histories.
//!
//! One fold serves both time bases. A [`TimeBasis`] only decides which month
//! a qualifying row is attributed to; which rows qualify is fixed by the
//! [`CounterDefinition`] of each KPI. Counts are distinct job seekers per
//! KPI and month.

use super::{Kpi, ReportingMonth};
use crate::pipeline::domain::{JobSeekerId, Task, TaskGroupHistory};
use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Which month a counted row is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBasis {
    /// Month in which the counted task was recorded.
    ActivityMonth,
    /// Month of the job seeker's interview timeline.
    InterviewMonth,
}

/// Month attribution strategy with the data it needs.
#[derive(Debug, Clone)]
pub enum MonthAttribution {
    /// Bucket by task creation time at the reporting offset.
    Activity {
        /// Reporting offset.
        offset: FixedOffset,
    },
    /// Bucket by each seeker's resolved interview date.
    Interview {
        /// Interview date per seeker.
        dates: HashMap<JobSeekerId, NaiveDate>,
    },
}

impl MonthAttribution {
    /// Returns the basis this attribution implements.
    #[must_use]
    pub const fn basis(&self) -> TimeBasis {
        match self {
            Self::Activity { .. } => TimeBasis::ActivityMonth,
            Self::Interview { .. } => TimeBasis::InterviewMonth,
        }
    }

    /// Returns the month a qualifying task counts in, if any.
    #[must_use]
    pub fn month_of(&self, job_seeker_id: JobSeekerId, task: &Task) -> Option<ReportingMonth> {
        match self {
            Self::Activity { offset } => Some(ReportingMonth::at_offset(task.created_at(), *offset)),
            Self::Interview { dates } => dates
                .get(&job_seeker_id)
                .copied()
                .map(ReportingMonth::containing),
        }
    }
}

/// Distinct seekers per KPI and month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiTally {
    seekers: BTreeMap<(Kpi, ReportingMonth), BTreeSet<JobSeekerId>>,
}

impl KpiTally {
    /// Returns the number of distinct seekers counted.
    #[must_use]
    pub fn count(&self, kpi: Kpi, month: ReportingMonth) -> u64 {
        self.seekers
            .get(&(kpi, month))
            .map_or(0, |seekers| u64::try_from(seekers.len()).unwrap_or(u64::MAX))
    }

    /// Returns the seekers counted for a KPI in a month.
    pub fn seekers(&self, kpi: Kpi, month: ReportingMonth) -> impl Iterator<Item = JobSeekerId> + '_ {
        self.seekers
            .get(&(kpi, month))
            .into_iter()
            .flat_map(|seekers| seekers.iter().copied())
    }

    fn record(&mut self, kpi: Kpi, month: ReportingMonth, job_seeker_id: JobSeekerId) {
        self.seekers
            .entry((kpi, month))
            .or_default()
            .insert(job_seeker_id);
    }
}

/// Counts every KPI in `kpis` over the given histories.
///
/// A target row counts only when a prerequisite row appears strictly earlier
/// in the same history.
#[must_use]
pub fn tally<'a>(
    histories: impl IntoIterator<Item = &'a TaskGroupHistory>,
    kpis: &[Kpi],
    attribution: &MonthAttribution,
) -> KpiTally {
    let mut result = KpiTally::default();
    for history in histories {
        let job_seeker_id = history.group().job_seeker_id();
        for &kpi in kpis {
            for task in qualifying_tasks(history, kpi) {
                if let Some(month) = attribution.month_of(job_seeker_id, task) {
                    result.record(kpi, month, job_seeker_id);
                }
            }
        }
    }
    result
}

/// Returns the tasks of a history that count towards `kpi`.
#[must_use]
pub fn qualifying_tasks(history: &TaskGroupHistory, kpi: Kpi) -> Vec<&Task> {
    let definition = kpi.definition();
    let mut prerequisite_seen = definition.prerequisite().is_none();
    let mut counted = Vec::new();
    for task in history.tasks() {
        if prerequisite_seen && definition.is_target(task.phase()) {
            counted.push(task);
        }
        if definition
            .prerequisite()
            .is_some_and(|matcher| matcher.matches(task.phase()))
        {
            prerequisite_seen = true;
        }
    }
    counted
}
