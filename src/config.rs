//! Runtime configuration shared by the pipeline and performance services.

use crate::pipeline::domain::{ContinuationPolicy, TransitionPolicy};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for pipeline rules and reporting.
///
/// # Examples
///
/// ```
/// use recruitflow::config::PipelineConfig;
/// use recruitflow::pipeline::domain::TransitionPolicy;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.reporting_offset_seconds, 9 * 3600);
/// assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
///
/// let strict = PipelineConfig::strict();
/// assert_eq!(strict.transition_policy, TransitionPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Offset east of UTC, in seconds, used to bucket activity timestamps
    /// into reporting months.
    pub reporting_offset_seconds: i32,
    /// Rule applied when a phase is appended to a group.
    pub transition_policy: TransitionPolicy,
    /// Rule applied by continuation lookups.
    pub continuation_policy: ContinuationPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reporting_offset_seconds: 9 * 3600, // UTC+09:00
            transition_policy: TransitionPolicy::Permissive,
            continuation_policy: ContinuationPolicy::BelowHundred,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration that enforces legal phase edges and keeps
    /// terminal tasks out of continuation lookups.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            transition_policy: TransitionPolicy::Strict,
            continuation_policy: ContinuationPolicy::ExcludeTerminal,
            ..Self::default()
        }
    }

    /// Returns the reporting offset.
    ///
    /// Out-of-range values fall back to UTC.
    #[must_use]
    pub fn reporting_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.reporting_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}
