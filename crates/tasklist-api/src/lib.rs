//! Tasklist API - multi-tenant to-do REST server
//!
//! Each registered user owns a private set of tasks, reachable only with a
//! bearer access token. Tokens are stateless HS256 JWTs; task queries are
//! owner-scoped at the SQL level.

pub mod auth;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod todos;

use axum::Router;
use state::AppState;
use std::sync::Arc;
use tasklist_core::AppConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::root_handler,
        handlers::health::user_root_handler,
        handlers::health::health_handler,
        handlers::auth::register_handler,
        handlers::auth::login_handler,
        handlers::auth::refresh_handler,
        handlers::auth::me_handler,
        handlers::todos::create_todo,
        handlers::todos::list_todos,
        handlers::todos::get_todo,
        handlers::todos::update_todo,
        handlers::todos::delete_todo,
    ),
    components(schemas(
        handlers::health::MessageResponse,
        handlers::health::HealthResponse,
        handlers::auth::RegisterResponse,
        handlers::todos::DeleteTodoResponse,
        auth::models::RegisterRequest,
        auth::models::RefreshRequest,
        auth::models::TokenPair,
        auth::models::UserPublic,
        todos::models::Todo,
        todos::models::TodoCreate,
        todos::models::TodoEdit,
        error::ApiError,
    )),
    tags(
        (name = "health", description = "Welcome and liveness"),
        (name = "user", description = "Registration and profile"),
        (name = "token", description = "Login and refresh"),
        (name = "todos", description = "Tenant-scoped tasks"),
    )
)]
pub struct ApiDoc;

/// Build the application router around the given state
pub fn create_router(state: Arc<AppState>) -> Router {
    routes::api_routes(state.clone())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Router backed by a lazily-connecting pool, for endpoint tests that never
/// reach the database.
pub fn create_router_for_testing() -> Router {
    let config = AppConfig::default();
    let pool = db::connect_lazy(&config.database).expect("failed to build lazy pool");
    create_router(Arc::new(AppState::new(config, pool)))
}
