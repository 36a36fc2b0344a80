//! Application layer - the cart engine, startup mode selection, and catalog
//! handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod bootstrap;
pub mod cart;
pub mod handlers;

pub use bootstrap::{Bootstrap, BootstrapSelector, ConnectionEvent, ConnectionObserver};
pub use cart::{CartEngine, Mutation, MutationResult, SyncOutcome};
pub use handlers::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    ListProductsHandler, ListProductsQuery, UpdateProductCommand, UpdateProductHandler,
};
