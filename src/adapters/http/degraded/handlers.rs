//! Fixed handlers for degraded mode. None of them perform I/O.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::cart::CartResponse;
use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::product::ProductResponse;
use crate::domain::cart::CartSnapshot;
use crate::domain::catalog::{demo_catalog, ProductError};

pub(crate) const CART_UNAVAILABLE: &str = "Cart is unavailable in demo mode";

/// GET /products - The built-in demo catalog
pub async fn demo_products() -> Response {
    let products: Vec<ProductResponse> = demo_catalog().iter().map(ProductResponse::from).collect();
    (StatusCode::OK, Json(products)).into_response()
}

/// GET /cart - Always empty
pub async fn empty_cart() -> Response {
    (StatusCode::OK, Json(CartResponse::from(&CartSnapshot::empty()))).into_response()
}

/// Any cart mutation
pub async fn cart_unavailable() -> Response {
    ErrorResponse::unavailable(CART_UNAVAILABLE).into_response_with(StatusCode::SERVICE_UNAVAILABLE)
}

/// Any catalog mutation
pub async fn catalog_read_only() -> Response {
    ErrorResponse::unavailable(ProductError::Unavailable.message())
        .into_response_with(StatusCode::SERVICE_UNAVAILABLE)
}
