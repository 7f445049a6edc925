//! KPI reporting over task histories.

use crate::config::PipelineConfig;
use crate::performance::{
    domain::{
        Kpi, KpiTally, MonthAttribution, PerformanceDomainError, PerformanceReport, PerformanceScope,
        PerformanceSubject, ReportingMonth, TimeBasis, interview_dates, tally,
    },
    ports::InterviewTimelineRepository,
};
use crate::pipeline::{
    domain::{JobSeekerId, TaskGroupHistory},
    ports::{EntryScope, PipelineRepository, PipelineRepositoryError},
};
use chrono::FixedOffset;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`PerformanceService`].
#[derive(Debug, Error)]
pub enum PerformanceError {
    /// The request was malformed.
    #[error(transparent)]
    Domain(#[from] PerformanceDomainError),
    /// A store failed.
    #[error(transparent)]
    Repository(#[from] PipelineRepositoryError),
}

/// Result type for performance operations.
pub type PerformanceResult<T> = Result<T, PerformanceError>;

/// Computes KPI counts on demand.
#[derive(Clone)]
pub struct PerformanceService<P, T>
where
    P: PipelineRepository,
    T: InterviewTimelineRepository,
{
    pipeline: Arc<P>,
    timelines: Arc<T>,
    reporting_offset: FixedOffset,
}

impl<P, T> PerformanceService<P, T>
where
    P: PipelineRepository,
    T: InterviewTimelineRepository,
{
    /// Creates a new reporting service.
    #[must_use]
    pub fn new(pipeline: Arc<P>, timelines: Arc<T>, config: &PipelineConfig) -> Self {
        Self {
            pipeline,
            timelines,
            reporting_offset: config.reporting_offset(),
        }
    }

    /// Returns the number of distinct job seekers counted for one KPI.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceError::Repository`] when a store read fails.
    pub async fn count(
        &self,
        scope: PerformanceScope,
        basis: TimeBasis,
        month: ReportingMonth,
        kpi: Kpi,
    ) -> PerformanceResult<u64> {
        let report = self.monthly_report(scope, basis, month).await?;
        Ok(report.count(kpi))
    }

    /// Returns every KPI for one month.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceError::Repository`] when a store read fails.
    pub async fn monthly_report(
        &self,
        scope: PerformanceScope,
        basis: TimeBasis,
        month: ReportingMonth,
    ) -> PerformanceResult<PerformanceReport> {
        let counted = self.tally_scope(scope, basis).await?;
        Ok(PerformanceReport::from_tally(scope, basis, month, &counted))
    }

    /// Returns one report per month from `from` through `to`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`PerformanceDomainError::InvertedRange`] (wrapped) when `to`
    /// precedes `from`, or [`PerformanceError::Repository`] when a store read
    /// fails.
    pub async fn monthly_series(
        &self,
        scope: PerformanceScope,
        basis: TimeBasis,
        from: ReportingMonth,
        to: ReportingMonth,
    ) -> PerformanceResult<Vec<PerformanceReport>> {
        if to < from {
            return Err(PerformanceDomainError::InvertedRange { from, to }.into());
        }
        let counted = self.tally_scope(scope, basis).await?;
        tracing::debug!(from = %from, to = %to, "building performance series");
        Ok(from
            .through(to)
            .map(|month| PerformanceReport::from_tally(scope, basis, month, &counted))
            .collect())
    }

    async fn tally_scope(
        &self,
        scope: PerformanceScope,
        basis: TimeBasis,
    ) -> PerformanceResult<KpiTally> {
        let histories = self.scoped_histories(scope).await?;
        let attribution = self.attribution(basis, &histories).await?;
        tracing::debug!(
            groups = histories.len(),
            basis = ?basis,
            "tallying performance counters"
        );
        Ok(tally(&histories, &Kpi::ALL, &attribution))
    }

    async fn scoped_histories(
        &self,
        scope: PerformanceScope,
    ) -> PerformanceResult<Vec<TaskGroupHistory>> {
        let entry_scope = match scope.subject {
            PerformanceSubject::Agent(agent_id) => EntryScope::Agent(agent_id),
            PerformanceSubject::Staff(staff_id) => EntryScope::Staff(staff_id),
        };
        Ok(self
            .pipeline
            .histories(entry_scope)
            .await?
            .into_iter()
            .filter(|owned| scope.matches(&owned.ownership))
            .map(|owned| owned.history)
            .collect())
    }

    async fn attribution(
        &self,
        basis: TimeBasis,
        histories: &[TaskGroupHistory],
    ) -> PerformanceResult<MonthAttribution> {
        match basis {
            TimeBasis::ActivityMonth => Ok(MonthAttribution::Activity {
                offset: self.reporting_offset,
            }),
            TimeBasis::InterviewMonth => {
                let seekers: Vec<JobSeekerId> = histories
                    .iter()
                    .map(|history| history.group().job_seeker_id())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let timelines = self.timelines.find_by_job_seekers(&seekers).await?;
                let dates = interview_dates(&timelines);
                if dates.len() < seekers.len() {
                    tracing::debug!(
                        seekers = seekers.len(),
                        dated = dates.len(),
                        "some job seekers have no interview date and are not attributed"
                    );
                }
                Ok(MonthAttribution::Interview { dates })
            }
        }
    }
}
