//! Selection-flow templates and the satellite records they mandate.

use super::{Phase, PhaseCategory, PhaseOutcome, SelectionFlowPatternId, TerminalReason, step};
use serde::{Deserialize, Serialize};

/// Expected step of a selection flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStep {
    /// Phase category the step maps to.
    pub phase_category: PhaseCategory,
    /// Target passing rate in percent.
    pub passing_rate: Option<u8>,
    /// Example of a passing profile.
    pub pass_example: String,
    /// Example of a failing profile.
    pub fail_example: String,
    /// Whether the job seeker must answer a questionnaire after the step.
    pub requires_questionnaire: bool,
}

impl SelectionStep {
    /// Creates a step without passing-rate metadata.
    #[must_use]
    pub const fn new(phase_category: PhaseCategory) -> Self {
        Self {
            phase_category,
            passing_rate: None,
            pass_example: String::new(),
            fail_example: String::new(),
            requires_questionnaire: false,
        }
    }

    /// Marks the post-step questionnaire as mandatory.
    #[must_use]
    pub fn with_questionnaire(mut self) -> Self {
        self.requires_questionnaire = true;
        self
    }

    /// Sets the passing-rate target and examples.
    #[must_use]
    pub fn with_guidance(
        mut self,
        passing_rate: u8,
        pass_example: impl Into<String>,
        fail_example: impl Into<String>,
    ) -> Self {
        self.passing_rate = Some(passing_rate);
        self.pass_example = pass_example.into();
        self.fail_example = fail_example.into();
        self
    }
}

/// Ordered template of selection steps for a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFlowPattern {
    /// Store-assigned identifier.
    pub id: SelectionFlowPatternId,
    /// Display name.
    pub name: String,
    /// Steps in order.
    pub steps: Vec<SelectionStep>,
}

/// Template awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSelectionFlowPattern {
    /// Display name.
    pub name: String,
    /// Steps in order.
    pub steps: Vec<SelectionStep>,
}

impl SelectionFlowPattern {
    /// Returns the step mapped to the given category.
    #[must_use]
    pub fn step_for(&self, category: PhaseCategory) -> Option<&SelectionStep> {
        self.steps
            .iter()
            .find(|candidate| candidate.phase_category == category)
    }
}

/// Satellite records an append must create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SatelliteRequirements {
    /// An evaluation point must accompany the task.
    pub evaluation_point: bool,
    /// A post-step questionnaire must be issued.
    pub questionnaire: bool,
}

impl SatelliteRequirements {
    /// Derives the requirements for a phase under an optional template.
    ///
    /// Phases that do not map to a template step require nothing. A mapped
    /// step needs an evaluation point when the phase carries the employer's
    /// result, and a questionnaire when the step demands one and the
    /// interview has just been held.
    #[must_use]
    pub fn for_phase(pattern: Option<&SelectionFlowPattern>, phase: Phase) -> Self {
        let Some(mapped) = pattern.and_then(|flow| flow.step_for(phase.category())) else {
            return Self::default();
        };
        let evaluation_point = matches!(
            phase.outcome(),
            PhaseOutcome::Ongoing(s) if s == step::selection::RESULT_COLLECTED
        ) || phase.outcome() == PhaseOutcome::Terminal(TerminalReason::RejectedByCompany);
        let questionnaire = mapped.requires_questionnaire
            && phase.step() == Some(step::selection::AWAITING_RESULT);
        Self {
            evaluation_point,
            questionnaire,
        }
    }

    /// Returns `true` when nothing beyond the task is required.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.evaluation_point && !self.questionnaire
    }
}
