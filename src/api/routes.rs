//! API Routes
//!
//! Configures the Axum router with the data and cache administration endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    asset_handler, clear_cache_handler, health_handler, metadata_handler, nav_data_handler,
    stats_handler, AppState,
};
use crate::cache::{cache_response, CachedRoute};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /nav/data` - Navigation tree (cached)
/// - `GET /apa/asset?device_type=` - Asset configuration for a device (cached)
/// - `GET /apa/metadata` - Client metadata parameters (cached)
/// - `DELETE /cache[?key=]` - Clear one cached response or all of them
/// - `GET /cache/stats` - Response cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Response cache: applied to the data routes only, with the default TTL
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cached = CachedRoute::new(state.cache.clone(), state.cache.default_ttl())
        .with_max_body_bytes(state.max_body_bytes);

    let data_routes = Router::new()
        .route("/nav/data", get(nav_data_handler))
        .route("/apa/asset", get(asset_handler))
        .route("/apa/metadata", get(metadata_handler))
        .route_layer(middleware::from_fn_with_state(cached, cache_response));

    let admin_routes = Router::new()
        .route("/cache", delete(clear_cache_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/health", get(health_handler));

    data_routes
        .merge(admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
