//! Bootstrap retry configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::bootstrap::RetryPolicy;

/// Startup probe and observer timing.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Connection attempts before degrading
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after the first failed attempt
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Multiplier applied to the delay after each further failure
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,

    /// Upper bound for any single delay
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Upper bound for a single connection attempt
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_ms: u64,

    /// Health poll cadence once persistent
    #[serde(default = "default_health_check_interval")]
    pub health_check_interval_secs: u64,
}

impl BootstrapConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            growth_factor: self.growth_factor,
            max_delay: Duration::from_millis(self.max_delay_ms),
            attempt_timeout: Duration::from_millis(self.attempt_timeout_ms),
        }
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 0.0 {
            return Err(ValidationError::InvalidRetry("growth_factor must be positive"));
        }
        if self.attempt_timeout_ms == 0 {
            return Err(ValidationError::InvalidRetry("attempt_timeout_ms must be positive"));
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(ValidationError::InvalidRetry("max_delay_ms is below base_delay_ms"));
        }
        if self.health_check_interval_secs == 0 {
            return Err(ValidationError::InvalidRetry(
                "health_check_interval_secs must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay(),
            growth_factor: default_growth_factor(),
            max_delay_ms: default_max_delay(),
            attempt_timeout_ms: default_attempt_timeout(),
            health_check_interval_secs: default_health_check_interval(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    500
}

fn default_growth_factor() -> f64 {
    2.0
}

fn default_max_delay() -> u64 {
    5000
}

fn default_attempt_timeout() -> u64 {
    10_000
}

fn default_health_check_interval() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_retry_policy_defaults() {
        assert_eq!(BootstrapConfig::default().retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn non_positive_growth_is_rejected() {
        let config = BootstrapConfig {
            growth_factor: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cap_below_base_is_rejected() {
        let config = BootstrapConfig {
            base_delay_ms: 1000,
            max_delay_ms: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
