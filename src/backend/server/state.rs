/**
 * Application State
 *
 * `AppState` is cloned into every route. It holds the configuration, the
 * dispatcher and one instance of each handler; none of it is mutable.
 */
use std::sync::Arc;

use crate::backend::dispatch::{ApiRequest, Dispatcher, Handler, ResponseEnvelope};
use crate::backend::folders::FolderStore;
use crate::backend::handlers::{ClientConfig, CreateFolder, ListFolders, OAuthExchange};
use crate::backend::http::HttpClient;
use crate::shared::config::AppConfig;

/// Every handler the API routes dispatch to
pub struct Handlers {
    pub list_folders: ListFolders,
    pub create_folder: CreateFolder,
    pub oauth: OAuthExchange,
    pub client_config: ClientConfig,
}

impl Handlers {
    pub fn new(store: Arc<dyn FolderStore>) -> Self {
        Self {
            list_folders: ListFolders::new(store.clone()),
            create_folder: CreateFolder::new(store),
            oauth: OAuthExchange::new(),
            client_config: ClientConfig::new(),
        }
    }
}

/// Application state shared by all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Dispatcher,
    pub handlers: Arc<Handlers>,
}

impl AppState {
    /// Create the state from its collaborators
    ///
    /// # Arguments
    ///
    /// * `config` - Validated application configuration
    /// * `store` - Folder persistence
    /// * `http_client` - Transport for outbound calls
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn FolderStore>,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.clone(), http_client),
            handlers: Arc::new(Handlers::new(store)),
            config,
        }
    }

    /// Dispatch `request` to `handler` and return its terminal response
    pub async fn dispatch(&self, handler: &dyn Handler, request: ApiRequest) -> ResponseEnvelope {
        self.dispatcher.dispatch(handler, request).await.response
    }
}
