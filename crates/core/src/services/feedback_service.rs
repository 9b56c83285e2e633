use chrono::{DateTime, Utc};

use crate::models::notification::{Notification, Severity};
use crate::models::pnl::{PnlPeriod, PnlStep};

/// How long the success toast stays up.
pub const SUCCESS_DURATION_MS: u64 = 3000;

/// How long the error toast stays up.
pub const ERROR_DURATION_MS: u64 = 2000;

/// Builds the user-facing notifications that close a fetch cycle.
pub struct FeedbackService;

impl FeedbackService {
    pub fn new() -> Self {
        Self
    }

    /// Whole seconds between `start` and `end`, rounded to nearest with halves
    /// going up (so -0.5 s reads as 0).
    #[must_use]
    pub fn elapsed_secs(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        let ms = (end - start).num_milliseconds();
        (ms as f64 / 1000.0 + 0.5).floor() as i64
    }

    #[must_use]
    pub fn success(
        &self,
        address: &str,
        step: PnlStep,
        period: PnlPeriod,
        elapsed_secs: i64,
    ) -> Notification {
        Notification {
            title: format!("{address} Step: {step} Period: {period} {elapsed_secs} sec"),
            severity: Severity::Success,
            duration_ms: SUCCESS_DURATION_MS,
            is_closable: true,
        }
    }

    #[must_use]
    pub fn failure(&self, elapsed_secs: i64) -> Notification {
        Notification {
            title: format!("Fetch PNL error. {elapsed_secs}sec"),
            severity: Severity::Error,
            duration_ms: ERROR_DURATION_MS,
            is_closable: true,
        }
    }
}

impl Default for FeedbackService {
    fn default() -> Self {
        Self::new()
    }
}
