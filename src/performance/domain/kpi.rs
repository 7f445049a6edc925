//! KPI catalogue and the counter definitions behind each KPI.

use crate::pipeline::domain::{Phase, PhaseCategory, SubPhase, step};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline milestones counted in performance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kpi {
    /// Postings introduced to job seekers.
    JobIntroduction,
    /// Recommendations sent after the seeker consented.
    RecommendationCompletion,
    /// Candidacies reaching the first selection round.
    Selection,
    /// Candidacies reaching the final selection round.
    FinalSelection,
    /// Offers extended.
    Offer,
}

impl Kpi {
    /// Every KPI in report order.
    pub const ALL: [Self; 5] = [
        Self::JobIntroduction,
        Self::RecommendationCompletion,
        Self::Selection,
        Self::FinalSelection,
        Self::Offer,
    ];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobIntroduction => "job_introduction",
            Self::RecommendationCompletion => "recommendation_completion",
            Self::Selection => "selection",
            Self::FinalSelection => "final_selection",
            Self::Offer => "offer",
        }
    }

    /// Returns the counter behind this KPI.
    #[must_use]
    pub const fn definition(self) -> CounterDefinition {
        match self {
            Self::JobIntroduction => {
                CounterDefinition::new(PhaseMatcher::category(PhaseCategory::JobIntroduction))
            }
            Self::RecommendationCompletion => CounterDefinition::new(PhaseMatcher::step(
                PhaseCategory::Recommendation,
                step::recommendation::RECOMMENDED,
            ))
            .after(PhaseMatcher::step(
                PhaseCategory::Recommendation,
                step::recommendation::SEEKER_CONSENT,
            )),
            Self::Selection => {
                CounterDefinition::new(PhaseMatcher::category(PhaseCategory::FirstSelection))
                    .after(PhaseMatcher::category(PhaseCategory::Recommendation))
            }
            Self::FinalSelection => {
                CounterDefinition::new(PhaseMatcher::category(PhaseCategory::FinalSelection))
            }
            Self::Offer => CounterDefinition::new(PhaseMatcher::category(PhaseCategory::Offer)),
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches tasks by category and, optionally, a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMatcher {
    category: PhaseCategory,
    step: Option<SubPhase>,
}

impl PhaseMatcher {
    /// Matches any task in the category, whatever its outcome.
    #[must_use]
    pub const fn category(category: PhaseCategory) -> Self {
        Self {
            category,
            step: None,
        }
    }

    /// Matches ongoing tasks at exactly this step.
    #[must_use]
    pub const fn step(category: PhaseCategory, step: SubPhase) -> Self {
        Self {
            category,
            step: Some(step),
        }
    }

    /// Returns `true` when `phase` satisfies the matcher.
    #[must_use]
    pub fn matches(self, phase: Phase) -> bool {
        phase.category() == self.category
            && self.step.is_none_or(|wanted| phase.step() == Some(wanted))
    }
}

/// Target and prerequisite of a KPI counter.
///
/// A task counts when it is ongoing, matches the target, and (when a
/// prerequisite is set) an earlier task of the same group matches the
/// prerequisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDefinition {
    target: PhaseMatcher,
    prerequisite: Option<PhaseMatcher>,
}

impl CounterDefinition {
    /// Creates a counter without prerequisite.
    #[must_use]
    pub const fn new(target: PhaseMatcher) -> Self {
        Self {
            target,
            prerequisite: None,
        }
    }

    /// Requires an earlier task matching `prerequisite`.
    #[must_use]
    pub const fn after(self, prerequisite: PhaseMatcher) -> Self {
        Self {
            target: self.target,
            prerequisite: Some(prerequisite),
        }
    }

    /// Returns the target matcher.
    #[must_use]
    pub const fn target(&self) -> PhaseMatcher {
        self.target
    }

    /// Returns the prerequisite matcher.
    #[must_use]
    pub const fn prerequisite(&self) -> Option<PhaseMatcher> {
        self.prerequisite
    }

    /// Returns `true` when `phase` is a countable target row.
    #[must_use]
    pub fn is_target(&self, phase: Phase) -> bool {
        phase.is_ongoing() && self.target.matches(phase)
    }
}
