//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Substance catalog
        .route("/substances", get(handlers::list_substances))
        .route(
            "/substances/{name}/routes/{route}/duration",
            get(handlers::get_roa_duration),
        )
        // Timeline computation
        .route("/timeline", post(handlers::compute_timeline_handler));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Cap request bodies at 4 MiB
        .layer(DefaultBodyLimit::max(4 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
