/**
 * Server Initialization
 *
 * `create_app` builds the production collaborators from configuration;
 * `build_app` assembles a router from collaborators supplied by the caller,
 * which is what the integration tests use.
 */
use std::sync::Arc;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::folders::FolderStore;
use crate::backend::http::{HttpClient, ReqwestClient};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_folder_store;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Validated application configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Errors
///
/// Fails when the configured database is unreachable or the HTTP client
/// cannot be built.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing smolcms backend server");

    let config = Arc::new(config);
    let store = load_folder_store(&config).await?;
    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(config.http_timeout)?);

    let app = build_app(config, store, http_client);
    tracing::info!("Router configured");

    Ok(app)
}

/// Assemble the router from explicit collaborators
pub fn build_app(
    config: Arc<AppConfig>,
    store: Arc<dyn FolderStore>,
    http_client: Arc<dyn HttpClient>,
) -> Router<()> {
    create_router(AppState::new(config, store, http_client))
}
