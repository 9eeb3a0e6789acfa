//! To-do item models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A to-do item, table `todo`
///
/// Visible and mutable only through its owner; every query that touches
/// this table is filtered by `user_id` first.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub is_completed: bool,
    pub user_id: i64,
}

/// Creation request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TodoCreate {
    /// Task text, 3-54 characters
    #[validate(length(min = 3, max = 54, message = "content must be 3-54 characters"))]
    pub content: String,
}

/// Edit request body; both fields are overwritten together
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TodoEdit {
    #[validate(length(min = 3, max = 54, message = "content must be 3-54 characters"))]
    pub content: String,
    pub is_completed: bool,
}
