//! API route definitions

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, health, todos};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Build the full route tree
///
/// The state is taken here (rather than left generic) because the auth
/// middleware needs the pool to resolve token subjects.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/user/", get(health::user_root_handler))
        .route("/user/register", post(auth::register_handler))
        .route("/token", post(auth::login_handler))
        .route("/token/refresh", post(auth::refresh_handler));

    // Protected routes (bearer access token required)
    let protected_routes = Router::new()
        .route("/user/me", get(auth::me_handler))
        .route("/todos/", post(todos::create_todo))
        .route("/todos/", get(todos::list_todos))
        .route("/todos/:id", get(todos::get_todo))
        .route("/todos/:id", put(todos::update_todo))
        .route("/todos/:id", delete(todos::delete_todo))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
