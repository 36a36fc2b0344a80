//! Durable store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::bootstrap::ConfigurationError;

/// Store configuration as loaded. Nothing here is required.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// PostgreSQL connection URL. Unset means degraded mode.
    pub url: Option<SecretString>,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Checked store settings, ready for a connector.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub url: SecretString,
    pub min_connections: u32,
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Checks the section and yields connector settings.
    pub fn settings(&self) -> Result<StoreSettings, ConfigurationError> {
        let url = self
            .url
            .as_ref()
            .filter(|u| !u.expose_secret().trim().is_empty())
            .ok_or(ConfigurationError::MissingLocation)?;
        let raw = url.expose_secret();
        if !raw.starts_with("postgres://") && !raw.starts_with("postgresql://") {
            return Err(ConfigurationError::InvalidLocation(
                "expected a postgres:// or postgresql:// URL".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigurationError::invalid_setting(
                "min_connections",
                "exceeds max_connections",
            ));
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(ConfigurationError::invalid_setting(
                "max_connections",
                "must be between 1 and 100",
            ));
        }
        Ok(StoreSettings {
            url: url.clone(),
            min_connections: self.min_connections,
            max_connections: self.max_connections,
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            run_migrations: self.run_migrations,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            idle_timeout_secs: default_idle_timeout(),
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> StoreConfig {
        StoreConfig {
            url: Some(SecretString::new(url.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn missing_url_is_missing_location() {
        assert_eq!(
            StoreConfig::default().settings().unwrap_err(),
            ConfigurationError::MissingLocation
        );
        assert_eq!(
            with_url("  ").settings().unwrap_err(),
            ConfigurationError::MissingLocation
        );
    }

    #[test]
    fn non_postgres_url_is_invalid() {
        assert!(matches!(
            with_url("mongodb://localhost/shop").settings(),
            Err(ConfigurationError::InvalidLocation(_))
        ));
    }

    #[test]
    fn pool_bounds_are_checked() {
        let config = StoreConfig {
            min_connections: 20,
            max_connections: 10,
            ..with_url("postgres://localhost/shop")
        };
        assert!(config.settings().is_err());

        let config = StoreConfig {
            max_connections: 101,
            ..with_url("postgres://localhost/shop")
        };
        assert!(config.settings().is_err());
    }

    #[test]
    fn valid_section_yields_settings() {
        let settings = with_url("postgresql://shop@localhost/shop").settings().unwrap();
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.url.expose_secret(), "postgresql://shop@localhost/shop");
    }
}
