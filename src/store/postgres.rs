//! PostgreSQL-backed initializer and reader.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::store::{pick_names, User, NAME_POOL, SEED_COUNT};

const CREATE_USERS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS users (id SERIAL PRIMARY KEY, name VARCHAR(100) NOT NULL)";
const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";
const SELECT_USERS: &str = "SELECT id, name FROM users";
const INSERT_USER: &str = "INSERT INTO users (name) VALUES ($1)";

/// PostgreSQL error code for "relation does not exist".
const PG_UNDEFINED_TABLE: &str = "42P01";

/// Outcome of the startup seeding pass.
enum SeedOutcome {
    /// The table already held rows; nothing was written.
    AlreadyPopulated(i64),
    /// The table was created and/or seeded with the given names.
    Seeded(Vec<String>),
}

/// Ensure the `users` table exists and holds sample rows.
///
/// Runs once before the dispatcher accepts connections. Any failure is
/// logged and swallowed: the server starts either way, and `/users` will
/// retry (or report) on demand.
pub async fn initialize(config: &Config) {
    info!("initializing user store at {}:{}", config.database_host, config.database_port);

    match ensure_seeded(config).await {
        Ok(SeedOutcome::AlreadyPopulated(count)) => {
            info!("users table already has {} rows, leaving it untouched", count);
        }
        Ok(SeedOutcome::Seeded(names)) if names.is_empty() => {
            info!("users table was populated concurrently, no rows inserted");
        }
        Ok(SeedOutcome::Seeded(names)) => {
            info!("seeded users table with {} rows: {}", names.len(), names.join(", "));
        }
        Err(err) => {
            error!("user store initialization failed: {}", err);
        }
    }
}

/// Read all users over a fresh connection.
///
/// A missing table is not an error: it is created, seeded, and re-queried,
/// so the first `/users` call against a cold database returns rows.
pub async fn fetch_users(config: &Config) -> StoreResult<Vec<User>> {
    let mut conn = connect(config).await?;

    match select_users(&mut conn).await {
        Ok(users) => Ok(users),
        Err(StoreError::MissingTable) => {
            info!("users table missing, creating and seeding");
            create_and_seed(&mut conn).await?;
            select_users(&mut conn).await
        }
        Err(err) => Err(err),
    }
}

async fn ensure_seeded(config: &Config) -> StoreResult<SeedOutcome> {
    let mut conn = connect(config).await?;

    match count_users(&mut conn).await {
        Ok(count) if count > 0 => return Ok(SeedOutcome::AlreadyPopulated(count)),
        Ok(_) => {}
        // Missing relation means "proceed to create", not failure.
        Err(StoreError::MissingTable) => {}
        Err(err) => return Err(err),
    }

    let names = create_and_seed(&mut conn).await?;
    Ok(SeedOutcome::Seeded(names))
}

/// Create the table if absent and, if it is still empty, insert
/// [`SEED_COUNT`] random names. One transaction; a concurrent creator may
/// win the race, which the re-count inside the transaction absorbs.
async fn create_and_seed(conn: &mut PgConnection) -> StoreResult<Vec<String>> {
    let mut tx = conn.begin().await.map_err(classify)?;

    sqlx::query(CREATE_USERS_TABLE)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

    let count: i64 = sqlx::query_scalar(COUNT_USERS)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

    let mut names = Vec::new();
    if count == 0 {
        names = pick_names(&NAME_POOL, SEED_COUNT);
        for name in &names {
            sqlx::query(INSERT_USER)
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
        }
    }

    tx.commit().await.map_err(classify)?;
    Ok(names)
}

async fn connect(config: &Config) -> StoreResult<PgConnection> {
    let options = PgConnectOptions::new()
        .host(&config.database_host)
        .port(config.database_port)
        .database(&config.database_name)
        .username(&config.database_user)
        .password(&config.database_password);

    options.connect().await.map_err(classify)
}

async fn count_users(conn: &mut PgConnection) -> StoreResult<i64> {
    sqlx::query_scalar(COUNT_USERS)
        .fetch_one(conn)
        .await
        .map_err(classify)
}

async fn select_users(conn: &mut PgConnection) -> StoreResult<Vec<User>> {
    sqlx::query_as::<_, User>(SELECT_USERS)
        .fetch_all(conn)
        .await
        .map_err(classify)
}

/// Map an undefined-table error to the typed `MissingTable` case by its
/// PostgreSQL error code; everything else passes through verbatim.
fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_UNDEFINED_TABLE) => {
            StoreError::MissingTable
        }
        _ => StoreError::Database(err),
    }
}
