//! To-do CRUD handlers
//!
//! Every handler receives the already-resolved `CurrentUser` and passes its
//! id into the owner-scoped repository; no query here can see another
//! tenant's tasks.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::todos::{Todo, TodoCreate, TodoEdit, TodoRepository};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Deletion confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTodoResponse {
    pub message: String,
}

fn todo_repo(state: &AppState) -> TodoRepository {
    TodoRepository::new(state.db_pool.clone())
}

/// Create a task for the current user
#[utoipa::path(
    post,
    path = "/todos/",
    tag = "todos",
    request_body = TodoCreate,
    responses(
        (status = 201, description = "Task created", body = Todo),
        (status = 400, description = "Content outside 3-54 characters", body = crate::error::ApiError),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoCreate>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    request.validate()?;

    let todo = todo_repo(&state).create(user.id, &request.content).await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// List the current user's tasks
///
/// An empty list is reported as 404, matching the contract this API has
/// always had.
#[utoipa::path(
    get,
    path = "/todos/",
    tag = "todos",
    responses(
        (status = 200, description = "Task list", body = [Todo]),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "No tasks exist", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let todos = todo_repo(&state).list(user.id).await?;
    if todos.is_empty() {
        return Err(AppError::NotFound("Tasks".to_string()));
    }

    Ok(Json(todos))
}

/// Get a single task by id
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task", body = Todo),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "Task absent or owned by another user", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let todo = todo_repo(&state)
        .find(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

    Ok(Json(todo))
}

/// Overwrite a task's content and completion state
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Task id")),
    request_body = TodoEdit,
    responses(
        (status = 200, description = "Updated task", body = Todo),
        (status = 400, description = "Content outside 3-54 characters", body = crate::error::ApiError),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "Task absent or owned by another user", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(request): Json<TodoEdit>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    request.validate()?;

    let todo = todo_repo(&state)
        .update(user.id, id, &request.content, request.is_completed)
        .await?
        .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

    Ok(Json(todo))
}

/// Delete a task
///
/// Not idempotent: deleting the same id twice fails with 404 the second
/// time.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted", body = DeleteTodoResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "Task absent or owned by another user", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let deleted = todo_repo(&state).delete(user.id, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Task".to_string()));
    }

    Ok(Json(DeleteTodoResponse {
        message: "Task successfully deleted".to_string(),
    }))
}
