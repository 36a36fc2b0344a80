//! Connection observer.
//!
//! Polls store health after the service went persistent and logs when the
//! connection is lost or comes back. It has no handle on the service mode.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::ports::ConnectionHealth;

/// A change in store reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    Lost,
    Recovered,
}

/// Background health poller.
pub struct ConnectionObserver {
    health: Arc<dyn ConnectionHealth>,
    interval: Duration,
    healthy: bool,
}

impl ConnectionObserver {
    /// Starts from the healthy state, since it is only created after a
    /// successful connection.
    pub fn new(health: Arc<dyn ConnectionHealth>, interval: Duration) -> Self {
        Self {
            health,
            interval,
            healthy: true,
        }
    }

    /// Polls until `shutdown` turns true.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("Connection observer stopped");
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.poll_once().await;
                }
            }
        }
    }

    /// Runs one health check and logs a transition if there was one.
    pub async fn poll_once(&mut self) -> Option<ConnectionEvent> {
        let healthy = self.health.is_healthy().await;
        let event = match (self.healthy, healthy) {
            (true, false) => {
                tracing::warn!("Store connection lost");
                Some(ConnectionEvent::Lost)
            }
            (false, true) => {
                tracing::info!("Store connection recovered");
                Some(ConnectionEvent::Recovered)
            }
            _ => None,
        };
        self.healthy = healthy;
        event
    }
}
