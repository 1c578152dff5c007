//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, invalidate_handler, set_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache` - Cache a value under (category, identifier)
/// - `GET /cache/:category/:identifier` - Look up a cached value
/// - `DELETE /cache/:category/:identifier` - Remove a single entry
/// - `POST /invalidate/:category` - Remove every entry of a category
/// - `GET /stats` - Cache effectiveness metrics
/// - `GET /health` - Tier connectivity and health
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cache", put(set_handler))
        .route("/cache/:category/:identifier", get(get_handler))
        .route("/cache/:category/:identifier", delete(delete_handler))
        .route("/invalidate/:category", post(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
