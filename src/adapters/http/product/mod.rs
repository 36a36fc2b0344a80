//! HTTP adapter for product endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateProductRequest, ProductCommandResponse, ProductResponse, UpdateProductRequest,
};
pub use handlers::ProductHandlers;
pub use routes::product_routes;
