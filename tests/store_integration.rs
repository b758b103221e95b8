//! Integration tests for the user store.
//!
//! These tests require a running PostgreSQL reachable through the usual
//! DATABASE_* environment variables (defaults target 127.0.0.1:5432).
//! They drop and recreate the `users` table, so point them at a scratch
//! database and run them serially:
//!
//!     cargo test --test store_integration -- --ignored --test-threads=1

#![cfg(feature = "postgres")]

use std::collections::HashSet;

use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgConnection};

use hola_service::config::Config;
use hola_service::store::{self, NAME_POOL, SEED_COUNT};

/// Get a test config from environment, defaulting to a local database.
fn test_config() -> Config {
    dotenvy::dotenv().ok();

    Config {
        database_host: std::env::var("DATABASE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        database_port: std::env::var("DATABASE_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(5432),
        database_name: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "postgres".to_string()),
        database_user: std::env::var("DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
        database_password: std::env::var("DATABASE_PASSWORD").unwrap_or_default(),
    }
}

async fn connect(config: &Config) -> PgConnection {
    PgConnectOptions::new()
        .host(&config.database_host)
        .port(config.database_port)
        .database(&config.database_name)
        .username(&config.database_user)
        .password(&config.database_password)
        .connect()
        .await
        .expect("connect to test database")
}

async fn drop_users_table(config: &Config) {
    let mut conn = connect(config).await;
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&mut conn)
        .await
        .expect("drop users table");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn initialize_seeds_an_empty_database() {
    let config = test_config();
    drop_users_table(&config).await;

    store::initialize(&config).await;

    let users = store::fetch_users(&config).await.expect("fetch users");
    assert_eq!(users.len(), SEED_COUNT);

    let names: HashSet<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names.len(), SEED_COUNT, "seeded names must be distinct");
    for name in &names {
        assert!(NAME_POOL.contains(name), "{name} is not in the pool");
    }

    for user in &users {
        assert!(user.id > 0);
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn initialize_leaves_a_populated_table_alone() {
    let config = test_config();
    drop_users_table(&config).await;

    store::initialize(&config).await;
    let before = store::fetch_users(&config).await.expect("fetch users");

    store::initialize(&config).await;
    let after = store::fetch_users(&config).await.expect("fetch users");

    assert_eq!(before.len(), after.len(), "re-initialization must not insert");
    let before_names: HashSet<&str> = before.iter().map(|user| user.name.as_str()).collect();
    let after_names: HashSet<&str> = after.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(before_names, after_names);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn fetch_users_creates_a_missing_table() {
    let config = test_config();
    drop_users_table(&config).await;

    // First read against a cold database: create, seed, return the rows.
    let users = store::fetch_users(&config).await.expect("fetch users");
    assert_eq!(users.len(), SEED_COUNT);
    for user in &users {
        assert!(NAME_POOL.contains(&user.name.as_str()));
    }

    // Second read sees the same rows, no further seeding.
    let again = store::fetch_users(&config).await.expect("fetch users");
    assert_eq!(again.len(), SEED_COUNT);
}
