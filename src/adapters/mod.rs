//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum routes for both service modes
//! - `memory` - In-memory store and repository
//! - `postgres` - PostgreSQL store, repository, and connector

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::{InMemoryCartStore, InMemoryProductRepository};
pub use postgres::{PostgresCartStore, PostgresConnector, PostgresHealth, PostgresProductRepository};
