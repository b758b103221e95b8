//! Error types for the user store.

use thiserror::Error;

/// Failures the user store can report.
///
/// `MissingTable` is classified from the structured PostgreSQL error code
/// (`42P01`), never from message text, and is handled as a normal branch:
/// the store creates and seeds the table instead of failing the request.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The crate was built without the `postgres` feature.
    #[error("postgres driver is not installed")]
    DriverUnavailable,

    /// The `users` relation does not exist yet.
    #[error("relation \"users\" does not exist")]
    MissingTable,

    /// Any other driver error; the message is surfaced verbatim.
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Database(sqlx::Error),
}

/// Convenient Result type alias.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_unavailable_message_is_fixed() {
        assert_eq!(
            StoreError::DriverUnavailable.to_string(),
            "postgres driver is not installed"
        );
    }

    #[test]
    fn missing_table_names_the_relation() {
        assert!(StoreError::MissingTable.to_string().contains("users"));
    }
}
