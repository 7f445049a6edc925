//! Report values returned by the performance service.

use super::{Kpi, KpiTally, PerformanceScope, ReportingMonth, TimeBasis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// KPI counts for one scope, basis, and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Measured scope.
    pub scope: PerformanceScope,
    /// Month attribution basis.
    pub basis: TimeBasis,
    /// Reporting month.
    pub month: ReportingMonth,
    /// Distinct job seekers per KPI; every KPI is present.
    pub counts: BTreeMap<Kpi, u64>,
}

impl PerformanceReport {
    /// Builds a zero-filled report for `month` from a tally.
    #[must_use]
    pub fn from_tally(
        scope: PerformanceScope,
        basis: TimeBasis,
        month: ReportingMonth,
        tally: &KpiTally,
    ) -> Self {
        let counts = Kpi::ALL
            .into_iter()
            .map(|kpi| (kpi, tally.count(kpi, month)))
            .collect();
        Self {
            scope,
            basis,
            month,
            counts,
        }
    }

    /// Returns the count for a KPI.
    #[must_use]
    pub fn count(&self, kpi: Kpi) -> u64 {
        self.counts.get(&kpi).copied().unwrap_or_default()
    }
}
