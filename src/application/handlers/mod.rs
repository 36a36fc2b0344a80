//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod product;

pub use product::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    ListProductsHandler, ListProductsQuery, UpdateProductCommand, UpdateProductHandler,
};
