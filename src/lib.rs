//! Catalog Cart - an online product catalog with an optimistic shopping cart.
//!
//! The cart engine applies every change to a local view first and reconciles
//! with the durable store afterwards. At startup the service probes the store
//! with bounded retries and either runs against it or falls back to a
//! read-only demo mode for the rest of the process lifetime.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
