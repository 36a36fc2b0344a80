//! HTTP handlers for cart endpoints.
//!
//! Mutations apply locally, then wait a bounded time for the durable write
//! so the response can say whether it landed. A failed or still running
//! write is still a success response; the write itself is never cancelled
//! with the request.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::cart::{CartEngine, Mutation};
use crate::domain::cart::CartError;
use crate::domain::foundation::{LineId, Price, ProductId};

use super::dto::{AddToCartRequest, CartMutationResponse, CartResponse, SetQuantityRequest};

/// GET /cart - Current local view
pub async fn get_cart(State(engine): State<CartEngine>) -> Response {
    let snapshot = engine.snapshot();
    (StatusCode::OK, Json(CartResponse::from(&snapshot))).into_response()
}

/// POST /cart - Add one unit of a product
pub async fn add_to_cart(
    State(engine): State<CartEngine>,
    Json(req): Json<AddToCartRequest>,
) -> Response {
    let product_id = match ProductId::new(req.product_id) {
        Ok(id) => id,
        Err(e) => return ErrorResponse::bad_request(e.to_string()).into_response_with(StatusCode::BAD_REQUEST),
    };
    if req.name.trim().is_empty() {
        return ErrorResponse::bad_request("name is required")
            .into_response_with(StatusCode::BAD_REQUEST);
    }
    let price = match Price::try_new(req.price) {
        Ok(price) => price,
        Err(e) => return ErrorResponse::bad_request(e.to_string()).into_response_with(StatusCode::BAD_REQUEST),
    };

    let mutation = engine.add_or_increment(product_id, req.name.trim(), price);
    respond(StatusCode::CREATED, mutation, &engine).await
}

/// PUT /cart/:id - Set a line's quantity; zero or less removes it
pub async fn set_quantity(
    State(engine): State<CartEngine>,
    Path(line_id): Path<String>,
    Json(req): Json<SetQuantityRequest>,
) -> Response {
    let line_id = match parse_line_id(&line_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match engine.set_quantity(line_id, req.quantity) {
        Ok(mutation) => respond(StatusCode::OK, mutation, &engine).await,
        Err(e) => handle_cart_error(e),
    }
}

/// DELETE /cart/:id - Remove a line
pub async fn remove_line(
    State(engine): State<CartEngine>,
    Path(line_id): Path<String>,
) -> Response {
    let line_id = match parse_line_id(&line_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match engine.remove_line(line_id) {
        Ok(mutation) => respond(StatusCode::OK, mutation, &engine).await,
        Err(e) => handle_cart_error(e),
    }
}

/// DELETE /cart - Empty the cart
pub async fn clear_cart(State(engine): State<CartEngine>) -> Response {
    respond(StatusCode::OK, engine.clear(), &engine).await
}

async fn respond(status: StatusCode, mutation: Mutation, engine: &CartEngine) -> Response {
    let result = mutation.settle_within(engine.sync_wait()).await;
    (status, Json(CartMutationResponse::from(result))).into_response()
}

fn parse_line_id(raw: &str) -> Result<LineId, Response> {
    raw.parse::<LineId>().map_err(|_| {
        ErrorResponse::bad_request("Invalid cart line ID").into_response_with(StatusCode::BAD_REQUEST)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_cart_error(error: CartError) -> Response {
    match error {
        CartError::LineNotFound(id) => ErrorResponse::not_found("Cart line", &id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        CartError::Invalid(e) => ErrorResponse::bad_request(e.to_string())
            .with_details(serde_json::json!({ "field": e.field() }))
            .into_response_with(StatusCode::BAD_REQUEST),
    }
}
