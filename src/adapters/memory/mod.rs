//! In-memory adapters for tests and local runs without a database.

mod cart_store;
mod product_repository;

pub use cart_store::InMemoryCartStore;
pub use product_repository::InMemoryProductRepository;
