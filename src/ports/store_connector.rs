//! Store connection ports used at bootstrap.
//!
//! `StoreConnector` opens a connection to the durable store; the bootstrap
//! selector calls it with a per-attempt timeout and retries on failure.
//! `ConnectionHealth` is polled afterwards purely for observability.

use async_trait::async_trait;
use thiserror::Error;

/// Failure to open a store connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store connection failed: {0}")]
pub struct ConnectError(pub String);

impl ConnectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Opens connections to the durable store.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Handle produced by a successful connection.
    type Connection: Send + Sync + 'static;

    /// Human-readable target for logs. Must not contain credentials.
    fn describe(&self) -> String;

    /// Attempts one connection.
    async fn connect(&self) -> Result<Self::Connection, ConnectError>;
}

/// Liveness check against an established connection.
#[async_trait]
pub trait ConnectionHealth: Send + Sync {
    /// Returns true if the store currently answers.
    async fn is_healthy(&self) -> bool;
}
