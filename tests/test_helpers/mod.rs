//! Shared helpers for integration tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::{PoisonError, RwLock};

/// Clock that only moves when a test moves it.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parses an RFC 3339 timestamp used in fixtures and feature files.
///
/// # Errors
///
/// Returns an error when the text is not RFC 3339.
pub fn timestamp(text: &str) -> Result<DateTime<Utc>, eyre::Report> {
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| eyre::eyre!("invalid timestamp {text}: {err}"))
}
