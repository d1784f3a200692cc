//! Database module
//!
//! Pool construction, connectivity and schema utilities.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{ConfigError, DatabaseConfig};

/// Schema of the `accounts` relation
const ACCOUNTS_SCHEMA: &str = include_str!("../migrations/0001_accounts.sql");

/// Advisory lock held while the schema is created
const SCHEMA_LOCK_KEY: i64 = 0x6163_636f_756e_7473;

/// Errors raised while setting up the database
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database schema incomplete: table '{0}' is missing")]
    MissingTable(&'static str),
}

/// Create the connection pool described by `config`
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let options = config.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect_with(options)
        .await?;

    verify_connection(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connected to PostgreSQL"
    );

    Ok(pool)
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Create the `accounts` table if it does not exist yet, then check it
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    // Concurrent CREATE TABLE IF NOT EXISTS can still collide in pg_type.
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(ACCOUNTS_SCHEMA).execute(&mut *tx).await?;
    tx.commit().await?;

    if !check_schema(pool).await? {
        return Err(DbError::MissingTable("accounts"));
    }

    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = ["accounts"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    Ok(true)
}
