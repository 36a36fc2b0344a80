//! Bootstrap error types.

use thiserror::Error;

/// The store location is missing or unusable.
///
/// Never fatal: the bootstrap selector resolves it by degrading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no store location configured")]
    MissingLocation,

    #[error("invalid store location: {0}")]
    InvalidLocation(String),

    #[error("invalid store setting '{field}': {reason}")]
    InvalidSetting { field: String, reason: String },
}

impl ConfigurationError {
    pub fn invalid_setting(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidSetting {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
