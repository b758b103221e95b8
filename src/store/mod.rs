//! User store: startup seeding and per-request reads.
//!
//! Every read opens its own connection and closes it when done; the process
//! holds no cache of the rows and no pool. The only shared mutable state is
//! the `users` table itself, so two cold-start requests may both attempt
//! creation; PostgreSQL's transactional DDL decides the winner.

mod seed;

#[cfg(feature = "postgres")]
mod postgres;

use serde::Serialize;

pub use seed::pick_names;

#[cfg(feature = "postgres")]
pub use postgres::{fetch_users, initialize};

/// Fixed pool of candidate names used when seeding an empty table.
pub const NAME_POOL: [&str; 15] = [
    "Alejandro",
    "Beatriz",
    "Carlos",
    "Diana",
    "Eduardo",
    "Francisca",
    "Gabriel",
    "Helena",
    "Ignacio",
    "Julieta",
    "Lorenzo",
    "Mariana",
    "Nicolas",
    "Olivia",
    "Patricio",
];

/// Number of rows inserted when seeding.
pub const SEED_COUNT: usize = 5;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    /// Store-assigned identifier.
    pub id: i32,
    /// Display name, at most 100 characters.
    pub name: String,
}

/// Body of a `/users` response. The two shapes are mutually exclusive and
/// exhaustive: a row list on success, an `error` string otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UsersResponse {
    /// Successful read of the whole table.
    Users {
        /// Rows in whatever order the database returned them.
        users: Vec<User>,
    },
    /// Read failed; the driver's message, verbatim.
    Error {
        /// Failure description.
        error: String,
    },
}

/// Seed the store before the dispatcher starts. Stub for builds without the
/// database driver: the process still serves every non-`/users` route.
#[cfg(not(feature = "postgres"))]
pub async fn initialize(_config: &crate::config::Config) {
    tracing::warn!("postgres driver is not installed, skipping user store initialization");
}

/// Read all users. Stub for builds without the database driver.
#[cfg(not(feature = "postgres"))]
pub async fn fetch_users(_config: &crate::config::Config) -> crate::error::StoreResult<Vec<User>> {
    Err(crate::error::StoreError::DriverUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn name_pool_has_fifteen_distinct_names() {
        let unique: HashSet<&str> = NAME_POOL.iter().copied().collect();
        assert_eq!(unique.len(), 15);
    }

    #[test]
    fn name_pool_fits_the_column() {
        for name in NAME_POOL {
            assert!(!name.is_empty());
            assert!(name.len() <= 100);
        }
    }

    #[test]
    fn success_body_serializes_as_users_list() {
        let body = UsersResponse::Users {
            users: vec![User {
                id: 1,
                name: "Carlos".to_string(),
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["users"][0]["id"], 1);
        assert_eq!(json["users"][0]["name"], "Carlos");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_body_serializes_as_error_only() {
        let body = UsersResponse::Error {
            error: "connection refused".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "connection refused");
        assert!(json.get("users").is_none());
    }
}
