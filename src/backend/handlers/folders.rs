/**
 * Folder Handlers
 *
 * `GET /api/folders` lists every folder. `POST /api/folders` creates an empty
 * folder named by the body's `name` field.
 *
 * # Logging
 *
 * Listing logs only when the store fails. Creating always logs the attempt
 * with the requested name, plus an error entry if the store fails.
 */
use std::sync::Arc;

use futures_util::future;
use futures_util::stream::{self, StreamExt};
use serde_json::{json, Value};

use crate::backend::dispatch::{ApiRequest, Handler, LogEntry, ResponseEnvelope, Sinks, Sources};
use crate::backend::effects::{EffectDescriptor, EffectError};
use crate::backend::error::RequestError;
use crate::backend::folders::FolderStore;
use crate::backend::handlers::validation::require_strings;
use crate::shared::config::AppConfig;

pub mod tags {
    pub const GET_FOLDERS: &str = "GET_FOLDERS";
    pub const CREATE_FOLDER: &str = "CREATE_FOLDER";
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, EffectError> {
    serde_json::to_value(value).map_err(|e| EffectError::Failed(e.to_string()))
}

/// `GET /api/folders`
pub struct ListFolders {
    store: Arc<dyn FolderStore>,
}

impl ListFolders {
    pub fn new(store: Arc<dyn FolderStore>) -> Self {
        Self { store }
    }
}

impl Handler for ListFolders {
    fn name(&self) -> &'static str {
        "folders.list"
    }

    fn handle(&self, _request: &ApiRequest, _config: &AppConfig, sources: Sources) -> Sinks {
        let store = self.store.clone();
        let effect = EffectDescriptor::new(tags::GET_FOLDERS, move || async move {
            let folders = store.list_folders().await?;
            to_json(folders)
        });

        let response = sources
            .effect
            .select(tags::GET_FOLDERS)
            .map(|outcome| match outcome.result {
                Ok(folders) => ResponseEnvelope::ok(folders),
                Err(error) => RequestError::from(error).to_envelope(),
            });

        let log = sources
            .effect
            .select_error(tags::GET_FOLDERS)
            .map(|error| LogEntry::error([error.to_string(), "error getting folders from db".into()]));

        Sinks::new(response)
            .with_log(log)
            .with_effect(stream::iter([effect]))
    }
}

/// `POST /api/folders`
pub struct CreateFolder {
    store: Arc<dyn FolderStore>,
}

impl CreateFolder {
    pub fn new(store: Arc<dyn FolderStore>) -> Self {
        Self { store }
    }
}

impl Handler for CreateFolder {
    fn name(&self) -> &'static str {
        "folders.create"
    }

    fn handle(&self, request: &ApiRequest, _config: &AppConfig, sources: Sources) -> Sinks {
        let name = match require_strings(&request.body, &["name"]) {
            Ok(mut values) => values.remove(0),
            Err(error) => return Sinks::respond(RequestError::from(error).to_envelope()),
        };

        let store = self.store.clone();
        let folder_name = name.clone();
        let effect = EffectDescriptor::new(tags::CREATE_FOLDER, move || async move {
            let folder = store.create_folder(&folder_name).await?;
            to_json(folder)
        });

        let response_name = name.clone();
        let response = sources
            .effect
            .select(tags::CREATE_FOLDER)
            .map(move |outcome| match outcome.result {
                Ok(folder) => ResponseEnvelope::ok(json!({
                    "guid": folder["id"],
                    "name": response_name,
                })),
                Err(error) => RequestError::from(error).to_envelope(),
            });

        let attempt = LogEntry::info([format!("creating folder: {}", name)]);
        let failures = sources
            .effect
            .select_error(tags::CREATE_FOLDER)
            .map(|error| LogEntry::error([error.to_string(), "error creating folder".into()]));
        let log = stream::once(future::ready(attempt)).chain(failures);

        Sinks::new(response)
            .with_log(log)
            .with_effect(stream::iter([effect]))
    }
}
