//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `cart` - Local cart view, cart lines, and durable store records
//! - `catalog` - Products and the built-in demo catalog
//! - `bootstrap` - Service mode and the startup retry policy

pub mod bootstrap;
pub mod cart;
pub mod catalog;
pub mod foundation;
