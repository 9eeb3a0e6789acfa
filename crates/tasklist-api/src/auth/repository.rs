//! Credential store queries
//!
//! Database access layer for user accounts. Each request works against the
//! shared pool; sqlx checks connections out per query and returns them on
//! every exit path.

use super::models::User;
use sqlx::PgPool;

/// Repository for rows in the `"user"` table
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return the stored row
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }

    /// Look up a user by username (access-token subject)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, username, email, password_hash FROM "user" WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Look up a user by email (refresh-token subject)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, username, email, password_hash FROM "user" WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Duplicate check used by registration
    pub async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM "user"
            WHERE username = $1 OR email = $2
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }
}
