//! Catalog domain - products and the built-in demo catalog.

mod demo;
mod errors;
mod product;

pub use demo::demo_catalog;
pub use errors::ProductError;
pub use product::{Product, ProductChanges};
