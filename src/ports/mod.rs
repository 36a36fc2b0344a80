//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CartStore` - The durable cart store the engine reconciles against
//! - `ProductRepository` - Catalog persistence
//! - `StoreConnector` / `ConnectionHealth` - Startup probing and liveness

mod cart_store;
mod product_repository;
mod store_connector;

pub use cart_store::CartStore;
pub use product_repository::ProductRepository;
pub use store_connector::{ConnectError, ConnectionHealth, StoreConnector};
