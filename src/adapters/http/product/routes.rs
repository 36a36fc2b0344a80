//! HTTP routes for product endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    create_product, delete_product, list_products, update_product, ProductHandlers,
};

/// Product router, to be nested under `/products`.
pub fn product_routes(handlers: ProductHandlers) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
        .with_state(handlers)
}
