//! Registration, login, refresh, and profile handlers

use crate::auth::{
    AuthService, CurrentUser, LoginForm, RefreshRequest, RegisterRequest, TokenPair, UserPublic,
};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Registration confirmation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.db_pool.clone(), state.config.auth.clone())
}

/// Register a new user account
///
/// Stores the username, email, and an Argon2id password hash. A duplicate
/// username or email is rejected with 409.
#[utoipa::path(
    post,
    path = "/user/register",
    tag = "user",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 409, description = "Username or email already taken", body = crate::error::ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let user = auth_service(&state).register(request).await?;

    let response = RegisterResponse {
        message: format!("User '{}' successfully registered", user.username),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with username and password
///
/// OAuth2 password-flow style form body. Returns an access/refresh token
/// pair; bad credentials are 401 with no hint whether the username exists.
#[utoipa::path(
    post,
    path = "/token",
    tag = "token",
    responses(
        (status = 200, description = "Token pair issued", body = TokenPair),
        (status = 401, description = "Invalid username or password", body = crate::error::ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let pair = auth_service(&state)
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(pair))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/token/refresh",
    tag = "token",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair issued", body = TokenPair),
        (status = 401, description = "Invalid or expired refresh token", body = crate::error::ApiError),
    )
)]
pub async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let pair = auth_service(&state).refresh(&request.refresh_token).await?;

    Ok(Json(pair))
}

/// Current user profile
///
/// The identity was already resolved against the credential store by the
/// auth middleware, so this is a pure echo of that lookup.
#[utoipa::path(
    get,
    path = "/user/me",
    tag = "user",
    responses(
        (status = 200, description = "Current user", body = UserPublic),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    Ok(Json(UserPublic {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}
