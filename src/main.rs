//! Catalog Cart server.
//!
//! Startup order: configuration, tracing, store bootstrap, then the route
//! table for whichever mode bootstrap settled on.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog_cart::adapters::http::{build_router, with_middleware, RouterServices};
use catalog_cart::adapters::postgres::{
    run_migrations, PostgresCartStore, PostgresConnector, PostgresHealth,
    PostgresProductRepository,
};
use catalog_cart::application::{BootstrapSelector, CartEngine, ConnectionObserver};
use catalog_cart::config::{AppConfig, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let selector = BootstrapSelector::new(config.bootstrap.retry_policy());
    let connector = config
        .store
        .settings()
        .map(|settings| PostgresConnector::new(settings, selector.policy().attempt_timeout));
    let bootstrap = selector.select(connector).await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let services = match bootstrap.connection {
        Some(pool) => persistent_services(pool, &config, shutdown_rx).await?,
        None => RouterServices::Degraded,
    };
    tracing::info!(mode = %services.mode(), "Service mode selected");

    let app = with_middleware(build_router(services), &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if shutdown_tx.send(true).is_err() {
        tracing::debug!("Connection observer already stopped");
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// Wires the persistent-mode services and starts the connection observer.
async fn persistent_services(
    pool: PgPool,
    config: &AppConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<RouterServices, BoxError> {
    if config.store.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let cart = CartEngine::new(Arc::new(PostgresCartStore::new(pool.clone())))
        .with_sync_wait(config.server.cart_sync_wait());
    cart.hydrate().await;

    let observer = ConnectionObserver::new(
        Arc::new(PostgresHealth::new(pool.clone())),
        config.bootstrap.health_check_interval(),
    );
    tokio::spawn(observer.run(shutdown));

    Ok(RouterServices::Persistent {
        cart,
        products: Arc::new(PostgresProductRepository::new(pool)),
    })
}

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
