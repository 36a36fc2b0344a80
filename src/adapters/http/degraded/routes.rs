//! HTTP routes served when no durable store is available.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{cart_unavailable, catalog_read_only, demo_products, empty_cart};

/// Demo catalog and read-only cart, mounted at the root.
pub fn degraded_routes() -> Router {
    Router::new()
        .route(
            "/products",
            get(demo_products).post(catalog_read_only),
        )
        .route(
            "/products/:id",
            put(catalog_read_only).delete(catalog_read_only),
        )
        .route(
            "/cart",
            get(empty_cart).post(cart_unavailable).delete(cart_unavailable),
        )
        .route(
            "/cart/:id",
            put(cart_unavailable).delete(cart_unavailable),
        )
}
