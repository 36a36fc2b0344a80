//! HTTP adapter for cart endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddToCartRequest, CartLineResponse, CartMutationResponse, CartResponse, SetQuantityRequest,
};
pub use routes::cart_routes;
