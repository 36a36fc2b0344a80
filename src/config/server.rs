//! HTTP listener and logging settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const DEFAULT_PORT: u16 = 5000;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where and how the catalog API listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub log_level: String,

    /// Upper bound on a single request.
    pub request_timeout_secs: u64,

    /// How long a cart request waits for its durable write before answering
    /// with `synced: false`. Must stay below the request timeout.
    pub cart_sync_wait_ms: u64,

    /// Comma separated allow-list. Unset allows any origin.
    pub cors_origins: Option<String>,
}

/// Deployment environment. Only production changes behavior (JSON logs).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidSocketAddr(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Structured JSON log lines instead of the human format.
    pub fn json_logs(&self) -> bool {
        self.is_production()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cart_sync_wait(&self) -> Duration {
        Duration::from_millis(self.cart_sync_wait_ms)
    }

    /// Allowed CORS origins; empty means any.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.cart_sync_wait() >= self.request_timeout() {
            return Err(ValidationError::InvalidSyncWait);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            environment: Environment::default(),
            log_level: "info,catalog_cart=debug,sqlx=warn".to_string(),
            request_timeout_secs: 30,
            cart_sync_wait_ms: 5_000,
            cors_origins: None,
        }
    }
}
