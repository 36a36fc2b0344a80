//! Cart error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, LineId, ValidationError};

/// Failure of a call against the durable cart store.
///
/// The engine never surfaces these as `Err` from its public contract: they
/// travel inside a [`SyncOutcome`](crate::application::cart::SyncOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartStoreError {
    /// The store rejected malformed input.
    #[error("store rejected input: {0}")]
    Validation(String),

    /// The addressed line does not exist in the store.
    #[error("line not found in store: {0}")]
    NotFound(String),

    /// Transport failure or timeout.
    #[error("store unreachable: {0}")]
    Unreachable(String),
}

impl CartStoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CartStoreError::Validation(message.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        CartStoreError::NotFound(id.into())
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        CartStoreError::Unreachable(message.into())
    }

    /// Only transport failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CartStoreError::Unreachable(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CartStoreError::Validation(_) => ErrorCode::ValidationFailed,
            CartStoreError::NotFound(_) => ErrorCode::LineNotFound,
            CartStoreError::Unreachable(_) => ErrorCode::StoreUnreachable,
        }
    }
}

impl From<ValidationError> for CartStoreError {
    fn from(err: ValidationError) -> Self {
        CartStoreError::Validation(err.to_string())
    }
}

/// Local contract violations of the cart engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No line with this id in the local view.
    #[error("cart line not found: {0}")]
    LineNotFound(LineId),

    /// Caller input rejected before any state change.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl CartError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::LineNotFound(_) => ErrorCode::LineNotFound,
            CartError::Invalid(_) => ErrorCode::ValidationFailed,
        }
    }
}
