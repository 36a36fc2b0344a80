//! HTTP handlers for product endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::product::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    ListProductsHandler, ListProductsQuery, UpdateProductCommand, UpdateProductHandler,
};
use crate::domain::catalog::ProductError;
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

use super::dto::{
    CreateProductRequest, ProductCommandResponse, ProductResponse, UpdateProductRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProductHandlers {
    list_handler: Arc<ListProductsHandler>,
    create_handler: Arc<CreateProductHandler>,
    update_handler: Arc<UpdateProductHandler>,
    delete_handler: Arc<DeleteProductHandler>,
}

impl ProductHandlers {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            list_handler: Arc::new(ListProductsHandler::new(repository.clone())),
            create_handler: Arc::new(CreateProductHandler::new(repository.clone())),
            update_handler: Arc::new(UpdateProductHandler::new(repository.clone())),
            delete_handler: Arc::new(DeleteProductHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /products - List the catalog
pub async fn list_products(State(handlers): State<ProductHandlers>) -> Response {
    match handlers.list_handler.handle(ListProductsQuery).await {
        Ok(products) => {
            let response: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_product_error(e),
    }
}

/// POST /products - Create a product
pub async fn create_product(
    State(handlers): State<ProductHandlers>,
    Json(req): Json<CreateProductRequest>,
) -> Response {
    let cmd = CreateProductCommand {
        name: req.name,
        price: req.price,
        image: req.image,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(product) => {
            let response = ProductCommandResponse {
                message: "Product created".to_string(),
                product: Some(ProductResponse::from(&product)),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_product_error(e),
    }
}

/// PUT /products/:id - Partially update a product
pub async fn update_product(
    State(handlers): State<ProductHandlers>,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Response {
    let product_id = match parse_product_id(product_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let cmd = UpdateProductCommand {
        product_id,
        changes: req.into(),
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(product) => {
            let response = ProductCommandResponse {
                message: "Updated".to_string(),
                product: Some(ProductResponse::from(&product)),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_product_error(e),
    }
}

/// DELETE /products/:id - Delete a product
pub async fn delete_product(
    State(handlers): State<ProductHandlers>,
    Path(product_id): Path<String>,
) -> Response {
    let product_id = match parse_product_id(product_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(DeleteProductCommand { product_id })
        .await
    {
        Ok(()) => {
            let response = ProductCommandResponse {
                message: "Deleted".to_string(),
                product: None,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_product_error(e),
    }
}

fn parse_product_id(raw: String) -> Result<ProductId, Response> {
    ProductId::new(raw).map_err(|_| {
        ErrorResponse::bad_request("Invalid product ID").into_response_with(StatusCode::BAD_REQUEST)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_product_error(error: ProductError) -> Response {
    match error {
        ProductError::NotFound(id) => ErrorResponse::not_found("Product", id.as_str())
            .into_response_with(StatusCode::NOT_FOUND),
        ProductError::ValidationFailed { field, message } => ErrorResponse::bad_request(format!(
            "Validation failed for {}: {}",
            field, message
        ))
        .into_response_with(StatusCode::BAD_REQUEST),
        ProductError::Unavailable => ErrorResponse::unavailable(ProductError::Unavailable.message())
            .into_response_with(StatusCode::SERVICE_UNAVAILABLE),
        ProductError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Product request failed");
            ErrorResponse::internal(msg).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
