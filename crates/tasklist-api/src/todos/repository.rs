//! Tenant-scoped task store
//!
//! Every statement filters by `user_id` in the same WHERE clause as any id
//! predicate, so a task belonging to another tenant is never addressable -
//! not even transiently between an id lookup and an ownership check.

use super::models::Todo;
use sqlx::PgPool;

/// Repository for rows in the `todo` table, always scoped to one owner
#[derive(Clone)]
pub struct TodoRepository {
    pool: PgPool,
}

impl TodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a task for `owner_id`; new tasks start uncompleted
    pub async fn create(&self, owner_id: i64, content: &str) -> Result<Todo, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todo (content, is_completed, user_id)
            VALUES ($1, FALSE, $2)
            RETURNING id, content, is_completed, user_id
            "#,
        )
        .bind(content)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    /// All tasks owned by `owner_id`, oldest first
    pub async fn list(&self, owner_id: i64) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, content, is_completed, user_id FROM todo WHERE user_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    /// A single task by id within the owner's set
    ///
    /// `None` covers both "no such id" and "owned by someone else"; the two
    /// are indistinguishable by design.
    pub async fn find(&self, owner_id: i64, id: i64) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, content, is_completed, user_id FROM todo WHERE user_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Overwrite content and completion state in one statement
    pub async fn update(
        &self,
        owner_id: i64,
        id: i64,
        content: &str,
        is_completed: bool,
    ) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todo
            SET content = $3, is_completed = $4
            WHERE user_id = $1 AND id = $2
            RETURNING id, content, is_completed, user_id
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(content)
        .bind(is_completed)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a task; returns false when nothing matched
    ///
    /// Deletion is not idempotent: a second delete of the same id sees no
    /// matching row and the caller reports NotFound.
    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo WHERE user_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
