//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the catalog and cart domains.

mod errors;
mod ids;
mod price;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{LineId, ProductId, RemoteLineId};
pub use price::Price;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
