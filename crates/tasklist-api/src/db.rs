//! Database pool and schema bootstrap

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tasklist_core::DatabaseConfig;

/// Connect a process-wide pool; sessions are checked out per request and
/// always returned to the pool when the request ends.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect(&config.url)
        .await
}

/// A pool that defers its first connection; used by tests that exercise
/// routes which never reach the database.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect_lazy(&config.url)
}

/// Create the `"user"` and `todo` tables if they do not exist yet.
/// Runs once at startup.
pub async fn create_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "user" (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todo (
            id BIGSERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            is_completed BOOLEAN NOT NULL DEFAULT FALSE,
            user_id BIGINT NOT NULL REFERENCES "user"(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
