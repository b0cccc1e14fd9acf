//! Bounded retry policy and the sleep seam it waits through

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LlmError;

/// How many times to try a call and how long to wait between tries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,

    /// Growth factor applied to each subsequent delay (1.0 = fixed delay)
    pub multiplier: f64,

    /// Upper bound for any single delay, in milliseconds
    #[serde(rename = "max-backoff-ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 1000,
            multiplier: 1.0,
            max_backoff_ms: 10_000,
        }
    }
}

impl RetryPolicy {
    /// Fixed-delay policy
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff_ms: delay.as_millis() as u64,
            multiplier: 1.0,
            max_backoff_ms: delay.as_millis() as u64,
        }
    }

    /// Attempts actually made; a zero setting still makes one call
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before retry number `retry` (1 = the wait after the first failure)
    pub fn delay_before(&self, retry: u32) -> Duration {
        let multiplier = if self.multiplier.is_finite() && self.multiplier >= 1.0 {
            self.multiplier
        } else {
            1.0
        };
        let factor = multiplier.powi(retry.saturating_sub(1).min(i32::MAX as u32) as i32);
        let base_secs = Duration::from_millis(self.backoff_ms).as_secs_f64();
        let cap_secs = Duration::from_millis(self.max_backoff_ms.max(self.backoff_ms)).as_secs_f64();
        let delay = Duration::from_secs_f64((base_secs * factor).min(cap_secs));
        debug!(retry, ?delay, "RetryPolicy::delay_before: computed");
        delay
    }

    /// Whether a failure on `attempt` (1-based) should be followed by another try
    pub fn should_retry(&self, attempt: u32, error: &LlmError) -> bool {
        attempt < self.attempts() && error.is_retryable()
    }
}

/// Waits between attempts; swapped out in tests to observe delays without waiting
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
