//! Bootstrap mode selector.
//!
//! Decides once, at process start, whether the service runs against the
//! durable store or in degraded mode. Connection attempts are bounded by a
//! per-attempt timeout and spaced by exponential backoff. The decision is
//! final; nothing downstream can reverse it.

use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::domain::bootstrap::{
    AttemptOutcome, BootstrapPhase, ConfigurationError, RetryAttempt, RetryPolicy, ServiceMode,
};
use crate::domain::foundation::StateMachine;
use crate::ports::StoreConnector;

/// Result of bootstrapping.
#[derive(Debug)]
pub struct Bootstrap<T> {
    pub mode: ServiceMode,
    /// Every attempt made, in order. Empty when no store was configured.
    pub attempts: Vec<RetryAttempt>,
    /// The live connection; present only in persistent mode.
    pub connection: Option<T>,
}

impl<T> Bootstrap<T> {
    fn degraded(attempts: Vec<RetryAttempt>) -> Self {
        Self {
            mode: ServiceMode::Degraded,
            attempts,
            connection: None,
        }
    }

    /// Failed attempts before the outcome was decided.
    pub fn failed_attempts(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| !a.outcome.is_success())
            .count()
    }
}

/// Runs the `Probing` phase to a terminal mode.
pub struct BootstrapSelector {
    policy: RetryPolicy,
}

impl BootstrapSelector {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Probes the store and picks the service mode.
    ///
    /// Runs until the bootstrap phase is terminal. A configuration error
    /// degrades immediately with zero attempts.
    pub async fn select<C: StoreConnector>(
        &self,
        connector: Result<C, ConfigurationError>,
    ) -> Bootstrap<C::Connection> {
        let connector = match connector {
            Ok(connector) => connector,
            Err(e) => {
                tracing::info!(reason = %e, "Store not configured, starting in degraded mode");
                advance(BootstrapPhase::Probing, BootstrapPhase::DegradedActive);
                return Bootstrap::degraded(Vec::new());
            }
        };

        let target = connector.describe();
        let mut phase = BootstrapPhase::Probing;
        let mut attempts = Vec::new();
        let mut connection = None;
        let mut attempt = 0u32;

        while !phase.is_terminal() {
            if attempt >= self.policy.max_attempts {
                phase = advance(phase, BootstrapPhase::DegradedActive);
                continue;
            }
            attempt += 1;
            tracing::info!(attempt, max_attempts = self.policy.max_attempts, target = %target, "Connecting to store");

            match timeout(self.policy.attempt_timeout, connector.connect()).await {
                Ok(Ok(connected)) => {
                    attempts.push(RetryAttempt {
                        attempt,
                        delay: None,
                        outcome: AttemptOutcome::Connected,
                    });
                    connection = Some(connected);
                    phase = advance(phase, BootstrapPhase::PersistentActive);
                    tracing::info!(attempt, target = %target, "Store connected");
                }
                Ok(Err(e)) => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        attempt,
                        error = %e,
                        delay_ms = delay.map(|d| d.as_millis() as u64),
                        "Store connection attempt failed"
                    );
                    attempts.push(RetryAttempt {
                        attempt,
                        delay,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                }
                Err(_) => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        attempt,
                        timeout_ms = self.policy.attempt_timeout.as_millis() as u64,
                        delay_ms = delay.map(|d| d.as_millis() as u64),
                        "Store connection attempt timed out"
                    );
                    attempts.push(RetryAttempt {
                        attempt,
                        delay,
                        outcome: AttemptOutcome::TimedOut,
                    });
                }
            }

            if !phase.is_terminal() {
                if let Some(delay) = attempts.last().and_then(|a| a.delay) {
                    sleep(delay).await;
                }
            }
        }

        let mode = phase.mode().unwrap_or(ServiceMode::Degraded);
        if mode.is_persistent() {
            tracing::info!(mode = %mode, target = %target, "Bootstrap finished");
            Bootstrap {
                mode,
                attempts,
                connection,
            }
        } else {
            tracing::info!(
                attempts = attempts.len(),
                target = %target,
                "Store unreachable, starting in degraded mode"
            );
            Bootstrap::degraded(attempts)
        }
    }

    /// Delay before the next attempt, or `None` after the last one.
    fn backoff(&self, failed_attempt: u32) -> Option<Duration> {
        self.policy
            .has_attempts_after(failed_attempt)
            .then(|| self.policy.delay_after(failed_attempt))
    }
}

/// Applies a validated phase transition. An illegal edge can only come from
/// a bug here, so it is logged and treated as degrading.
fn advance(from: BootstrapPhase, to: BootstrapPhase) -> BootstrapPhase {
    from.transition_to(to).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Unexpected bootstrap transition");
        BootstrapPhase::DegradedActive
    })
}
