//! HTTP routes for cart endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{add_to_cart, clear_cart, get_cart, remove_line, set_quantity};
use crate::application::cart::CartEngine;

/// Cart router, to be nested under `/cart`.
pub fn cart_routes(engine: CartEngine) -> Router {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/:id", put(set_quantity).delete(remove_line))
        .with_state(engine)
}
