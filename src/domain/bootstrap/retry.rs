//! Retry policy and per-attempt records for the startup probe.

use std::time::Duration;

/// Bounded exponential backoff.
///
/// The delay after the `n`-th failed attempt (1-based) is
/// `min(base_delay * growth_factor^(n-1), max_delay)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total connection attempts, including the first. Zero means degrade
    /// without trying.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub growth_factor: f64,
    pub max_delay: Duration,
    /// Upper bound for a single connection attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            growth_factor: 2.0,
            max_delay: Duration::from_secs(5),
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Policy that never attempts a connection.
    pub fn never() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    /// Backoff to sleep after the given failed attempt (1-based).
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1);
        let factor = self.growth_factor.max(1.0).powi(exponent.min(i32::MAX as u32) as i32);
        let millis = self.base_delay.as_millis() as f64 * factor;
        let cap = self.max_delay.as_millis() as f64;
        if !millis.is_finite() || millis >= cap {
            return self.max_delay;
        }
        Duration::from_millis(millis as u64)
    }

    /// Whether another attempt follows the given one (1-based).
    pub fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// What happened on one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Connected,
    Failed(String),
    TimedOut,
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Connected)
    }
}

/// Ephemeral record of one probe attempt. Only kept to drive the retry loop
/// and the log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryAttempt {
    /// 1-based attempt number.
    pub attempt: u32,
    /// Backoff slept after this attempt, if any.
    pub delay: Option<Duration>,
    pub outcome: AttemptOutcome,
}
