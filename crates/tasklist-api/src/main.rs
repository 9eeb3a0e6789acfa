//! Tasklist API server

use std::sync::Arc;
use tasklist_api::{create_router, db, state::AppState};
use tasklist_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Connect the pool and bootstrap the schema
    let pool = db::connect(&config.database).await?;
    tracing::info!("Creating tables");
    db::create_tables(&pool).await?;
    tracing::info!("Tables created");

    // Create application state and router
    let state = Arc::new(AppState::new(config, pool));
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Tasklist API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
