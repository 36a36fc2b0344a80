//! HTTP adapters - REST API implementations.
//!
//! - `cart` / `product` - Persistent-mode endpoints
//! - `degraded` - Fixed demo endpoints when no store is available
//! - `router` - Picks the route table for the service mode

pub mod cart;
pub mod degraded;
pub mod error;
pub mod product;
pub mod router;

pub use error::ErrorResponse;
pub use router::{build_router, with_middleware, RouterServices};
