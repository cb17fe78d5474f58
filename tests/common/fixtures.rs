//! Configuration, store and router fixtures

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use smolcms::backend::build_app;
use smolcms::backend::folders::{FolderStore, MemoryFolderStore, StorageError};
use smolcms::backend::http::HttpClient;
use smolcms::shared::{AppConfig, Folder};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-signing-key";

/// Configuration pointing both GitHub endpoints at `base_url`
pub fn test_config_with_base(base_url: &str) -> AppConfig {
    AppConfig::builder()
        .gh_client_id("test-client-id")
        .gh_client_secret("test-client-secret")
        .secret(TEST_SECRET)
        .oauth_base_url(base_url)
        .api_base_url(base_url)
        .build()
        .expect("test configuration is valid")
}

pub fn test_config() -> AppConfig {
    test_config_with_base("https://github.test")
}

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl FolderStore for FailingStore {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_folder(&self, _name: &str) -> Result<Folder, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_folder(&self, id: Uuid) -> Result<(), StorageError> {
        Err(StorageError::NotFound(id))
    }
}

/// Router over an in-memory store
pub fn memory_app(http_client: Arc<dyn HttpClient>) -> (Router, Arc<MemoryFolderStore>) {
    let store = Arc::new(MemoryFolderStore::new());
    let app = build_app(Arc::new(test_config()), store.clone(), http_client);
    (app, store)
}

pub fn app_with(
    config: AppConfig,
    store: Arc<dyn FolderStore>,
    http_client: Arc<dyn HttpClient>,
) -> Router {
    build_app(Arc::new(config), store, http_client)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn raw_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("valid request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Send one request through the router and collect status and body bytes
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    (status, bytes.to_vec())
}

/// Send one request and parse the body as JSON
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    let body = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, body)
}
