/**
 * Folder Store Contract
 */
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::Folder;

/// Persistence failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("folder {0} not found")]
    NotFound(Uuid),
}

/// Folder persistence
#[async_trait]
pub trait FolderStore: Send + Sync {
    /// Every folder, oldest first
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError>;

    /// Create an empty folder with a generated id
    async fn create_folder(&self, name: &str) -> Result<Folder, StorageError>;

    /// Delete a folder by id
    ///
    /// Fails with `StorageError::NotFound` when no folder has that id.
    async fn delete_folder(&self, id: Uuid) -> Result<(), StorageError>;
}
