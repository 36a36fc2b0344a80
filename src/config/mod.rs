//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CATALOG_CART` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use catalog_cart::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod bootstrap;
mod error;
mod server;
mod store;

pub use bootstrap::BootstrapConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::{StoreConfig, StoreSettings};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads and runs in
/// degraded mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Durable store configuration (PostgreSQL connection)
    #[serde(default)]
    pub store: StoreConfig,

    /// Startup probe configuration
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `CATALOG_CART__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CATALOG_CART__STORE__URL=...` -> `store.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CATALOG_CART")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate server and bootstrap settings.
    ///
    /// The store section is checked later by the bootstrap selector.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.bootstrap.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
