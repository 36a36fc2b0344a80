//! Catalog-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ProductId};

/// Catalog errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Product was not found.
    NotFound(ProductId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The catalog cannot be modified in the current service mode.
    Unavailable,
    /// Infrastructure error.
    Infrastructure(String),
}

impl ProductError {
    pub fn not_found(id: ProductId) -> Self {
        ProductError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProductError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProductError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::NotFound(_) => ErrorCode::ProductNotFound,
            ProductError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProductError::Unavailable => ErrorCode::ServiceUnavailable,
            ProductError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ProductError::NotFound(id) => format!("Product not found: {}", id),
            ProductError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProductError::Unavailable => "Catalog is read-only in demo mode".to_string(),
            ProductError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProductError {}

impl From<DomainError> for ProductError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                ProductError::validation(field, err.message)
            }
            _ => ProductError::infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_id() {
        let err = ProductError::not_found(ProductId::new("p-7").unwrap());
        assert_eq!(err.to_string(), "Product not found: p-7");
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
    }

    #[test]
    fn domain_validation_maps_to_validation_failed() {
        let err: ProductError = DomainError::validation("price", "bad price").into();
        assert_eq!(
            err,
            ProductError::ValidationFailed {
                field: "price".to_string(),
                message: "bad price".to_string()
            }
        );
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err: ProductError = DomainError::new(ErrorCode::DatabaseError, "boom").into();
        assert!(matches!(err, ProductError::Infrastructure(_)));
    }
}
