//! PostgreSQL connector, health check, and migrations.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StoreSettings;
use crate::ports::{ConnectError, ConnectionHealth, StoreConnector};

/// Opens a PostgreSQL pool.
///
/// Connecting eagerly establishes `min_connections`, so success means the
/// server answered.
pub struct PostgresConnector {
    settings: StoreSettings,
    acquire_timeout: Duration,
}

impl PostgresConnector {
    pub fn new(settings: StoreSettings, acquire_timeout: Duration) -> Self {
        Self {
            settings,
            acquire_timeout,
        }
    }
}

#[async_trait]
impl StoreConnector for PostgresConnector {
    type Connection = PgPool;

    fn describe(&self) -> String {
        redact(self.settings.url.expose_secret())
    }

    async fn connect(&self) -> Result<PgPool, ConnectError> {
        PgPoolOptions::new()
            .min_connections(self.settings.min_connections.max(1))
            .max_connections(self.settings.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Some(self.settings.idle_timeout))
            .connect(self.settings.url.expose_secret())
            .await
            .map_err(|e| ConnectError::new(e.to_string()))
    }
}

/// Liveness via `SELECT 1`.
#[derive(Clone)]
pub struct PostgresHealth {
    pool: PgPool,
}

impl PostgresHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionHealth for PostgresHealth {
    async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Drops credentials from a connection URL for logging.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_strips_credentials() {
        assert_eq!(
            redact("postgres://shop:hunter2@db:5432/shop"),
            "postgres://db:5432/shop"
        );
    }

    #[test]
    fn redact_leaves_plain_urls() {
        assert_eq!(redact("postgres://db/shop"), "postgres://db/shop");
    }
}
