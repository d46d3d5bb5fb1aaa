//! Retry policy — Transport retry and timeout control.
//!
//! [`RetryPolicy`] groups the static parameters that govern one model call:
//! how many attempts, how long to back off between them, and how long a
//! single call may run before it counts as a transient failure.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport retry parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first.
    pub max_attempts: u32,
    /// Backoff before retry `n` (0-based) is `base_delay * 2^n`.
    pub base_delay: Duration,
    /// Deadline for a single call. `None` leaves calls unbounded.
    pub call_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(2000),
            call_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl RetryPolicy {
    /// Wait before the retry that follows attempt `attempt_index`.
    pub fn backoff_delay(&self, attempt_index: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt_index).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Whether another attempt remains after `attempt_index`.
    pub fn has_attempts_after(&self, attempt_index: u32) -> bool {
        attempt_index + 1 < self.max_attempts
    }

    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}
