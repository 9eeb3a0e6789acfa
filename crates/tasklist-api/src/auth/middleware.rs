/// Authentication middleware for protected routes
///
/// Extracts the bearer token from the Authorization header, validates it as
/// an access token, and resolves its subject to a stored user. On success a
/// `CurrentUser` is added to request extensions; any failure terminates the
/// request with 401. There is no retry state - one bad token is one
/// rejected request.
use super::jwt::{decode_token_of_use, JwtError, TokenUse};
use super::models::User;
use super::repository::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Resolved identity of the requesting tenant
///
/// Added to request extensions by `auth_middleware` and extracted in
/// handlers with `Extension<CurrentUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Authentication middleware errors
///
/// Every variant maps to 401 with a uniform message; the reason is logged
/// server-side but never surfaced to the client.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),

    #[error("Token subject does not match a known user")]
    UnknownSubject,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error",
            _ => "Invalid authentication credentials",
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Require a valid access token and a matching stored user
///
/// Wired with `middleware::from_fn_with_state` because resolving the token
/// subject needs the database pool.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = decode_token_of_use(&state.config.auth, token, TokenUse::Access).map_err(|e| {
        tracing::debug!(reason = %e, "rejected bearer token");
        AuthError::InvalidToken(e)
    })?;

    // The subject must still exist in the credential store; a token for a
    // deleted or renamed account is rejected like any other bad token.
    let users = UserRepository::new(state.db_pool.clone());
    let user = users
        .find_by_username(&claims.sub)
        .await?
        .ok_or(AuthError::UnknownSubject)?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}
