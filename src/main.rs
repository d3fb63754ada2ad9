//! News API Backend
//!
//! A JSON REST backend over SQLite serving topics, articles and users.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod validation;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;
use errors::invalid_endpoint;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting News API Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;

    if config.seed_on_start {
        tracing::info!("Seeding reference dataset...");
        db::seed::seed(&pool, &db::seed::SeedData::reference()?).await?;
    }

    let state = AppState {
        repo: Arc::new(Repository::new(pool.clone())),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    pool.close().await;

    Ok(())
}

/// Create the application router with all routes.
///
/// Unknown paths and unregistered methods on known paths both answer 404 "Invalid endpoint.".
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Topics
        .route("/topics", get(api::list_topics).fallback(invalid_endpoint))
        // Articles
        .route(
            "/articles/{article_id}",
            get(api::get_article)
                .patch(api::patch_article_votes)
                .fallback(invalid_endpoint),
        )
        // Users
        .route("/users", get(api::list_users).fallback(invalid_endpoint));

    // The nested routes inherit this fallback
    Router::new()
        .nest("/api", api_routes)
        .fallback(invalid_endpoint)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(errors::panic_response)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
