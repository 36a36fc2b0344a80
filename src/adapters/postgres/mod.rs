//! PostgreSQL adapters - Database implementations of the store ports.
//!
//! - `PostgresCartStore` - The durable cart store
//! - `PostgresProductRepository` - Catalog persistence
//! - `PostgresConnector` / `PostgresHealth` - Bootstrap probing and liveness

mod cart_store;
mod connector;
mod errors;
mod product_repository;

pub use cart_store::PostgresCartStore;
pub use connector::{run_migrations, PostgresConnector, PostgresHealth};
pub use product_repository::PostgresProductRepository;
