//! Phase state model for the recruitment pipeline.
//!
//! A phase is a macro [`PhaseCategory`] plus a [`PhaseOutcome`]. Persistence
//! stores both as raw integers; the reserved sub-category values are decoded
//! into explicit outcome variants here so that no consumer compares against
//! magic numbers:
//!
//! - `90..=99` under any category is [`PhaseOutcome::Terminal`].
//! - `(9, 1001)` is [`PhaseOutcome::Closed`].
//! - Everything else is [`PhaseOutcome::Ongoing`].

use super::PipelineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro stage of a candidacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseCategory {
    /// The posting has been introduced to the job seeker.
    JobIntroduction,
    /// The job seeker is being recommended to the employer.
    Recommendation,
    /// First selection round.
    FirstSelection,
    /// Second selection round.
    SecondSelection,
    /// Third selection round.
    ThirdSelection,
    /// Fourth selection round.
    FourthSelection,
    /// Fifth selection round.
    FifthSelection,
    /// Final selection round.
    FinalSelection,
    /// Offer stage.
    Offer,
    /// Post-offer onboarding.
    PostOffer,
}

impl PhaseCategory {
    /// Every category in pipeline order.
    pub const ALL: [Self; 10] = [
        Self::JobIntroduction,
        Self::Recommendation,
        Self::FirstSelection,
        Self::SecondSelection,
        Self::ThirdSelection,
        Self::FourthSelection,
        Self::FifthSelection,
        Self::FinalSelection,
        Self::Offer,
        Self::PostOffer,
    ];

    /// Returns the persisted integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::JobIntroduction => 0,
            Self::Recommendation => 1,
            Self::FirstSelection => 2,
            Self::SecondSelection => 3,
            Self::ThirdSelection => 4,
            Self::FourthSelection => 5,
            Self::FifthSelection => 6,
            Self::FinalSelection => 7,
            Self::Offer => 8,
            Self::PostOffer => 9,
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobIntroduction => "job_introduction",
            Self::Recommendation => "recommendation",
            Self::FirstSelection => "first_selection",
            Self::SecondSelection => "second_selection",
            Self::ThirdSelection => "third_selection",
            Self::FourthSelection => "fourth_selection",
            Self::FifthSelection => "fifth_selection",
            Self::FinalSelection => "final_selection",
            Self::Offer => "offer",
            Self::PostOffer => "post_offer",
        }
    }

    /// Returns `true` for the first through final selection rounds.
    #[must_use]
    pub const fn is_selection_round(self) -> bool {
        matches!(
            self,
            Self::FirstSelection
                | Self::SecondSelection
                | Self::ThirdSelection
                | Self::FourthSelection
                | Self::FifthSelection
                | Self::FinalSelection
        )
    }
}

impl TryFrom<i32> for PhaseCategory {
    type Error = PipelineDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.code() == value)
            .ok_or(PipelineDomainError::InvalidPhaseCategory(value))
    }
}

impl fmt::Display for PhaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw sub-category range reserved for terminal outcomes.
const TERMINAL_RANGE: std::ops::RangeInclusive<u16> = 90..=99;

/// Raw sub-category marking a fully closed pipeline under [`PhaseCategory::PostOffer`].
const CLOSED_SUB_CATEGORY: u16 = 1001;

/// Fine-grained, non-sentinel step within a macro phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SubPhase(u16);

impl SubPhase {
    /// Creates an ordinary step value.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::ReservedSubPhase`] when the value lies
    /// in the terminal range or equals the closed marker.
    pub fn new(value: u16) -> Result<Self, PipelineDomainError> {
        if TERMINAL_RANGE.contains(&value) || value == CLOSED_SUB_CATEGORY {
            return Err(PipelineDomainError::ReservedSubPhase(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw step value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for SubPhase {
    type Error = PipelineDomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubPhase> for u16 {
    fn from(value: SubPhase) -> Self {
        value.0
    }
}

/// Named steps used throughout the pipeline.
///
/// Steps are shared by all selection rounds (first through final).
pub mod step {
    use super::SubPhase;

    /// Steps of [`super::PhaseCategory::JobIntroduction`].
    pub mod introduction {
        use super::SubPhase;

        /// Posting introduced to the job seeker.
        pub const INTRODUCED: SubPhase = SubPhase(0);
        /// Waiting for the job seeker's reply.
        pub const AWAITING_SEEKER_REPLY: SubPhase = SubPhase(1);
        /// Job seeker expressed interest.
        pub const SEEKER_INTERESTED: SubPhase = SubPhase(2);
        /// RA side is checking the candidacy.
        pub const RA_CHECKING: SubPhase = SubPhase(3);
        /// RA side approved the candidacy.
        pub const RA_APPROVED: SubPhase = SubPhase(4);
        /// Recommendation documents are being prepared.
        pub const PREPARING_RECOMMENDATION: SubPhase = SubPhase(5);
    }

    /// Steps of [`super::PhaseCategory::Recommendation`].
    pub mod recommendation {
        use super::SubPhase;

        /// Recommendation is being drafted.
        pub const PREPARING: SubPhase = SubPhase(0);
        /// Job seeker consented to the recommendation.
        pub const SEEKER_CONSENT: SubPhase = SubPhase(1);
        /// Recommendation sent to the employer.
        pub const RECOMMENDED: SubPhase = SubPhase(2);
        /// Document screening passed.
        pub const DOCUMENTS_PASSED: SubPhase = SubPhase(3);
    }

    /// Steps shared by every selection round.
    pub mod selection {
        use super::SubPhase;

        /// Collecting candidate interview dates.
        pub const COLLECTING_CANDIDATE_DATES: SubPhase = SubPhase(0);
        /// Candidate dates sent to the employer.
        pub const DATES_SENT: SubPhase = SubPhase(1);
        /// Interview scheduled.
        pub const SCHEDULED: SubPhase = SubPhase(2);
        /// Interview guidance sent to the job seeker.
        pub const GUIDANCE_SENT: SubPhase = SubPhase(3);
        /// Interview held, awaiting the result.
        pub const AWAITING_RESULT: SubPhase = SubPhase(4);
        /// Result collected from the employer.
        pub const RESULT_COLLECTED: SubPhase = SubPhase(5);
    }

    /// Steps of [`super::PhaseCategory::Offer`].
    pub mod offer {
        use super::SubPhase;

        /// Offer extended.
        pub const OFFERED: SubPhase = SubPhase(0);
        /// Conditions under negotiation.
        pub const NEGOTIATING: SubPhase = SubPhase(1);
        /// Offer accepted.
        pub const ACCEPTED: SubPhase = SubPhase(2);
    }

    /// Steps of [`super::PhaseCategory::PostOffer`].
    pub mod post_offer {
        use super::SubPhase;

        /// Onboarding preparation.
        pub const PREPARING_ONBOARDING: SubPhase = SubPhase(0);
        /// Joining date fixed.
        pub const JOINING_DATE_FIXED: SubPhase = SubPhase(1);
        /// Job seeker joined the employer.
        pub const JOINED: SubPhase = SubPhase(2);
    }
}

/// Reason a candidacy terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// Job seeker declined to continue.
    DeclinedBySeeker,
    /// Employer rejected the job seeker.
    RejectedByCompany,
    /// Posting was closed.
    PostingClosed,
    /// Job seeker stopped responding.
    NoResponse,
    /// Job seeker accepted another position.
    SelectedElsewhere,
    /// Job seeker declined the offer.
    OfferDeclined,
    /// Duplicate application through another channel.
    DuplicateApplication,
    /// Personal or health reasons.
    PersonalCircumstances,
    /// Conditions did not match.
    ConditionsMismatch,
    /// Any other reason.
    Other,
}

impl TerminalReason {
    /// Every reason in code order.
    pub const ALL: [Self; 10] = [
        Self::DeclinedBySeeker,
        Self::RejectedByCompany,
        Self::PostingClosed,
        Self::NoResponse,
        Self::SelectedElsewhere,
        Self::OfferDeclined,
        Self::DuplicateApplication,
        Self::PersonalCircumstances,
        Self::ConditionsMismatch,
        Self::Other,
    ];

    /// Returns the persisted sub-category code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::DeclinedBySeeker => 90,
            Self::RejectedByCompany => 91,
            Self::PostingClosed => 92,
            Self::NoResponse => 93,
            Self::SelectedElsewhere => 94,
            Self::OfferDeclined => 95,
            Self::DuplicateApplication => 96,
            Self::PersonalCircumstances => 97,
            Self::ConditionsMismatch => 98,
            Self::Other => 99,
        }
    }

    /// Decodes a terminal sub-category code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|reason| reason.code() == code)
    }
}

/// Outcome carried by a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// The candidacy continues at the given step.
    Ongoing(SubPhase),
    /// The candidacy ended in this phase.
    Terminal(TerminalReason),
    /// The pipeline is fully closed (onboarding complete).
    Closed,
}

/// A point in the recruitment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phase {
    category: PhaseCategory,
    outcome: PhaseOutcome,
}

impl Phase {
    /// Creates an ongoing phase.
    #[must_use]
    pub const fn ongoing(category: PhaseCategory, step: SubPhase) -> Self {
        Self {
            category,
            outcome: PhaseOutcome::Ongoing(step),
        }
    }

    /// Creates a terminal phase under the given category.
    #[must_use]
    pub const fn terminal(category: PhaseCategory, reason: TerminalReason) -> Self {
        Self {
            category,
            outcome: PhaseOutcome::Terminal(reason),
        }
    }

    /// Creates the closed marker.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            category: PhaseCategory::PostOffer,
            outcome: PhaseOutcome::Closed,
        }
    }

    /// Decodes a persisted `(phase_category, phase_sub_category)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidPhaseCategory`] for categories
    /// outside `0..=9` and [`PipelineDomainError::InvalidSubPhase`] for
    /// negative or oversized sub-categories, or for the closed marker under a
    /// category other than post-offer.
    pub fn from_raw(category: i32, sub_category: i32) -> Result<Self, PipelineDomainError> {
        let parsed_category = PhaseCategory::try_from(category)?;
        let invalid = || PipelineDomainError::InvalidSubPhase {
            category,
            sub_category,
        };
        let raw_sub = u16::try_from(sub_category).map_err(|_| invalid())?;

        if let Some(reason) = TerminalReason::from_code(raw_sub) {
            return Ok(Self::terminal(parsed_category, reason));
        }
        if raw_sub == CLOSED_SUB_CATEGORY {
            return if parsed_category == PhaseCategory::PostOffer {
                Ok(Self::closed())
            } else {
                Err(invalid())
            };
        }
        Ok(Self::ongoing(parsed_category, SubPhase(raw_sub)))
    }

    /// Returns the persisted `(phase_category, phase_sub_category)` pair.
    #[must_use]
    pub const fn raw(self) -> (i32, i32) {
        (self.category.code(), self.raw_sub_category())
    }

    /// Returns the persisted sub-category value.
    #[must_use]
    pub const fn raw_sub_category(self) -> i32 {
        match self.outcome {
            PhaseOutcome::Ongoing(step) => step.0 as i32,
            PhaseOutcome::Terminal(reason) => reason.code() as i32,
            PhaseOutcome::Closed => CLOSED_SUB_CATEGORY as i32,
        }
    }

    /// Returns the macro category.
    #[must_use]
    pub const fn category(self) -> PhaseCategory {
        self.category
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(self) -> PhaseOutcome {
        self.outcome
    }

    /// Returns the step when the phase is ongoing.
    #[must_use]
    pub const fn step(self) -> Option<SubPhase> {
        match self.outcome {
            PhaseOutcome::Ongoing(step) => Some(step),
            PhaseOutcome::Terminal(_) | PhaseOutcome::Closed => None,
        }
    }

    /// Returns `true` for ongoing phases.
    #[must_use]
    pub const fn is_ongoing(self) -> bool {
        matches!(self.outcome, PhaseOutcome::Ongoing(_))
    }

    /// Returns `true` for terminal (declined / rejected) phases.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self.outcome, PhaseOutcome::Terminal(_))
    }

    /// Returns `true` for the closed marker.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self.outcome, PhaseOutcome::Closed)
    }

    /// Returns `true` when `next` is a legal edge from this phase.
    ///
    /// Terminal and closed phases admit no further transition. Ongoing phases
    /// may stay in their category or move to any later one. The closed marker
    /// is reachable from the offer and post-offer stages only.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if !self.is_ongoing() {
            return false;
        }
        if next.is_closed() {
            return self.category >= PhaseCategory::Offer;
        }
        next.category >= self.category
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            PhaseOutcome::Ongoing(step) => write!(f, "{}/{}", self.category, step.0),
            PhaseOutcome::Terminal(reason) => {
                write!(f, "{}/terminal({})", self.category, reason.code())
            }
            PhaseOutcome::Closed => write!(f, "{}/closed", self.category),
        }
    }
}

/// Policy applied when a new phase is appended to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any phase may follow any phase.
    #[default]
    Permissive,
    /// Only the edges accepted by [`Phase::can_transition_to`] are legal.
    Strict,
}

impl TransitionPolicy {
    /// Returns `true` when the policy admits `from -> to`.
    #[must_use]
    pub fn permits(self, from: Phase, to: Phase) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => from.can_transition_to(to),
        }
    }
}
