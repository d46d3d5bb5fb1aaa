//! Retry configuration from TOML (`[retry]` section)

use super::validation::{ConfigIssue, ConfigIssueCode};
use dezin_application::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport retry settings
///
/// # Example
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// base_delay_ms = 2000
/// call_timeout_secs = 120   # 0 disables the per-call deadline
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub call_timeout_secs: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            call_timeout_secs: policy.call_timeout.map(|d| d.as_secs()).unwrap_or(0),
        }
    }
}

impl FileRetryConfig {
    pub fn to_retry_policy(&self) -> RetryPolicy {
        let call_timeout =
            (self.call_timeout_secs > 0).then(|| Duration::from_secs(self.call_timeout_secs));
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_base_delay(Duration::from_millis(self.base_delay_ms))
            .with_call_timeout(call_timeout)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_attempts == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroAttempts,
                "retry.max_attempts: must be at least 1",
            )]
        } else {
            Vec::new()
        }
    }
}
