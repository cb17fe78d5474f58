/**
 * In-Memory Folder Store
 *
 * Keeps folders in insertion order behind a `RwLock`. Contents are lost when
 * the process exits.
 */
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::folders::store::{FolderStore, StorageError};
use crate::shared::Folder;

#[derive(Debug, Default)]
pub struct MemoryFolderStore {
    folders: RwLock<Vec<Folder>>,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `folders`
    pub fn with_folders(folders: Vec<Folder>) -> Self {
        Self {
            folders: RwLock::new(folders),
        }
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        Ok(self.folders.read().await.clone())
    }

    async fn create_folder(&self, name: &str) -> Result<Folder, StorageError> {
        let folder = Folder::new(name);
        self.folders.write().await.push(folder.clone());
        tracing::debug!(id = %folder.id, "folder created in memory");
        Ok(folder)
    }

    async fn delete_folder(&self, id: Uuid) -> Result<(), StorageError> {
        let mut folders = self.folders.write().await;
        let before = folders.len();
        folders.retain(|folder| folder.id != id);

        if folders.len() == before {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}
