//! End-to-end startup tests: bootstrap picks a mode, the router serves it.
//!
//! Uses the in-memory store as the connector target, so no database is
//! needed.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use catalog_cart::adapters::http::{build_router, RouterServices};
use catalog_cart::adapters::{InMemoryCartStore, InMemoryProductRepository};
use catalog_cart::application::{BootstrapSelector, CartEngine};
use catalog_cart::domain::bootstrap::{ConfigurationError, RetryPolicy, ServiceMode};
use catalog_cart::ports::CartStore;

fn quick_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
        growth_factor: 2.0,
        max_delay: Duration::from_millis(5),
        attempt_timeout: Duration::from_millis(50),
    }
}

async fn start(store: Arc<InMemoryCartStore>) -> (ServiceMode, Router) {
    let bootstrap = BootstrapSelector::new(quick_policy())
        .select(Ok(store))
        .await;
    let services = match bootstrap.connection {
        Some(store) => {
            let engine = CartEngine::new(store as Arc<dyn CartStore>);
            engine.hydrate().await;
            RouterServices::Persistent {
                cart: engine,
                products: Arc::new(InMemoryProductRepository::new()),
            }
        }
        None => RouterServices::Degraded,
    };
    (bootstrap.mode, build_router(services))
}

async fn call(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

const ADD_NECKLACE: &str = r#"{"productId":"d1","name":"Gold Necklace","price":1999}"#;

#[tokio::test]
async fn reachable_store_serves_persistent_routes() {
    let store = Arc::new(InMemoryCartStore::new());
    let (mode, router) = start(store.clone()).await;

    assert_eq!(mode, ServiceMode::Persistent);
    let (status, body) = call(&router, Method::POST, "/cart", ADD_NECKLACE).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["synced"], true);
    assert_eq!(store.lines().len(), 1);
}

#[tokio::test]
async fn existing_store_contents_are_hydrated() {
    let store = Arc::new(InMemoryCartStore::new());
    store.insert(
        catalog_cart::domain::foundation::ProductId::new("d4").unwrap(),
        "Pearl Earrings",
        catalog_cart::domain::foundation::Price::try_new(1299.0).unwrap(),
        2,
    );
    let (_, router) = start(store).await;

    let (_, body) = call(&router, Method::GET, "/cart", "").await;
    assert_eq!(body["totalItemCount"], 2);
    assert_eq!(body["totalPrice"], 2598.0);
}

#[tokio::test]
async fn unreachable_store_serves_demo_routes() {
    let store = Arc::new(InMemoryCartStore::new());
    store.set_available(false);
    let (mode, router) = start(store.clone()).await;

    assert_eq!(mode, ServiceMode::Degraded);
    let (status, body) = call(&router, Method::GET, "/products", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, _) = call(&router, Method::POST, "/cart", ADD_NECKLACE).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn store_recovering_later_does_not_change_mode() {
    let store = Arc::new(InMemoryCartStore::new());
    store.set_available(false);
    let (_, router) = start(store.clone()).await;

    store.set_available(true);

    let (_, body) = call(&router, Method::GET, "/health", "").await;
    assert_eq!(body["mode"], "degraded");
    let (status, _) = call(&router, Method::POST, "/cart", ADD_NECKLACE).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(store.lines().is_empty());
}

#[tokio::test]
async fn store_outage_after_start_keeps_persistent_mode() {
    let store = Arc::new(InMemoryCartStore::new());
    let (_, router) = start(store.clone()).await;

    store.set_available(false);

    let (status, body) = call(&router, Method::POST, "/cart", ADD_NECKLACE).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["synced"], false);
    let (_, body) = call(&router, Method::GET, "/health", "").await;
    assert_eq!(body["mode"], "persistent");
}

#[tokio::test]
async fn missing_store_location_degrades_without_attempts() {
    let bootstrap = BootstrapSelector::new(quick_policy())
        .select::<Arc<InMemoryCartStore>>(Err(ConfigurationError::MissingLocation))
        .await;

    assert_eq!(bootstrap.mode, ServiceMode::Degraded);
    assert!(bootstrap.attempts.is_empty());
}
