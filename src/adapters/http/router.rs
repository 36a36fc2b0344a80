//! Mode-gated router.
//!
//! The service mode picks one of two route tables at startup. The choice is
//! made once; nothing here can switch tables later.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::cart::cart_routes;
use super::degraded::degraded_routes;
use super::product::{product_routes, ProductHandlers};
use crate::application::cart::CartEngine;
use crate::config::ServerConfig;
use crate::domain::bootstrap::ServiceMode;
use crate::ports::ProductRepository;

/// What the router serves, by mode.
#[derive(Clone)]
pub enum RouterServices {
    Persistent {
        cart: CartEngine,
        products: Arc<dyn ProductRepository>,
    },
    Degraded,
}

impl RouterServices {
    pub fn mode(&self) -> ServiceMode {
        match self {
            RouterServices::Persistent { .. } => ServiceMode::Persistent,
            RouterServices::Degraded => ServiceMode::Degraded,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    mode: ServiceMode,
}

/// GET /health
async fn health(State(mode): State<ServiceMode>) -> Response {
    (StatusCode::OK, Json(HealthResponse { mode })).into_response()
}

/// Builds the route table for the chosen mode.
pub fn build_router(services: RouterServices) -> Router {
    let mode = services.mode();
    let routes = match services {
        RouterServices::Persistent { cart, products } => Router::new()
            .nest("/products", product_routes(ProductHandlers::new(products)))
            .nest("/cart", cart_routes(cart)),
        RouterServices::Degraded => degraded_routes(),
    };

    routes.merge(
        Router::new()
            .route("/health", get(health))
            .with_state(mode),
    )
}

/// Adds tracing, CORS, and the request timeout.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = config.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
