/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines the
 * API routes, static file serving and middleware into a single Axum router.
 *
 * # Route Priority
 *
 * API routes are matched first. Any other path is served from the static
 * directory, falling back to its `index.html`.
 *
 * # Middleware
 *
 * - `TraceLayer` logs every HTTP request
 * - `CorsLayer::permissive()` is added in development only, where the client
 *   is served from a separate dev server
 */
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by all routes
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();
    let index = static_dir.join("index.html");

    // Add API routes
    let router = configure_api_routes(Router::new());

    // Static files, with the client app's entry point as fallback
    let router = router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));

    let router = router.layer(TraceLayer::new_for_http());

    let router = if app_state.config.is_development() {
        tracing::info!("Development mode: CORS is permissive");
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(app_state)
}
