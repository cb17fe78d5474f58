/**
 * API Route Handlers
 *
 * Each route extracts an `ApiRequest` and hands it to the matching handler
 * through the dispatcher. Malformed JSON bodies are answered by the
 * extractor before any handler runs.
 */
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{any, get};
use axum::Router;

use crate::backend::dispatch::{ApiRequest, ResponseEnvelope};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/folders", get(list_folders).post(create_folder))
        .route("/api/oauth", axum::routing::post(oauth))
        .route("/api/config", get(client_config))
        .route("/api/{*rest}", any(api_not_found))
}

async fn list_folders(State(state): State<AppState>, request: ApiRequest) -> ResponseEnvelope {
    state.dispatch(&state.handlers.list_folders, request).await
}

async fn create_folder(State(state): State<AppState>, request: ApiRequest) -> ResponseEnvelope {
    state.dispatch(&state.handlers.create_folder, request).await
}

async fn oauth(State(state): State<AppState>, request: ApiRequest) -> ResponseEnvelope {
    state.dispatch(&state.handlers.oauth, request).await
}

async fn client_config(State(state): State<AppState>, request: ApiRequest) -> ResponseEnvelope {
    state.dispatch(&state.handlers.client_config, request).await
}

async fn api_not_found() -> ResponseEnvelope {
    ResponseEnvelope::message(StatusCode::NOT_FOUND, "not found")
}
