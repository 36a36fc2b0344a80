//! Translation of sqlx errors into store errors.

use sqlx::error::ErrorKind;

use crate::domain::cart::CartStoreError;

/// Maps a sqlx failure onto the cart store error taxonomy.
pub(crate) fn store_error(err: sqlx::Error) -> CartStoreError {
    match &err {
        sqlx::Error::RowNotFound => CartStoreError::not_found(err.to_string()),
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => CartStoreError::validation(db.message()),
            _ => CartStoreError::unreachable(err.to_string()),
        },
        _ => CartStoreError::unreachable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_not_found() {
        assert!(matches!(
            store_error(sqlx::Error::RowNotFound),
            CartStoreError::NotFound(_)
        ));
    }

    #[test]
    fn transport_failures_are_unreachable() {
        for err in [
            sqlx::Error::PoolTimedOut,
            sqlx::Error::PoolClosed,
            sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "refused",
            )),
        ] {
            assert!(store_error(err).is_retryable());
        }
    }
}
