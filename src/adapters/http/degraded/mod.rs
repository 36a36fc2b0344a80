//! HTTP adapter for degraded mode.

mod handlers;
mod routes;

pub use routes::degraded_routes;
