/**
 * PostgreSQL Folder Store
 *
 * Folders live in the `folders` table created by the migrations under
 * `migrations/`. Tags and files are stored as `TEXT[]` columns.
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::folders::store::{FolderStore, StorageError};
use crate::shared::Folder;

/// Row as stored in the `folders` table
#[derive(Debug, sqlx::FromRow)]
struct FolderRow {
    id: Uuid,
    folder_name: String,
    tags: Vec<String>,
    files: Vec<String>,
}

impl From<FolderRow> for Folder {
    fn from(row: FolderRow) -> Self {
        Self {
            id: row.id,
            folder_name: row.folder_name,
            tags: row.tags.into_iter().collect(),
            files: row.files,
        }
    }
}

/// Folder store backed by a shared connection pool
#[derive(Debug, Clone)]
pub struct PgFolderStore {
    pool: PgPool,
}

impl PgFolderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for PgFolderStore {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        let rows = sqlx::query_as::<_, FolderRow>(
            r#"
            SELECT id, folder_name, tags, files
            FROM folders
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Folder::from).collect())
    }

    async fn create_folder(&self, name: &str) -> Result<Folder, StorageError> {
        let folder = Folder::new(name);
        let tags: Vec<String> = folder.tags.iter().cloned().collect();

        let row = sqlx::query_as::<_, FolderRow>(
            r#"
            INSERT INTO folders (id, folder_name, tags, files, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, folder_name, tags, files
            "#,
        )
        .bind(folder.id)
        .bind(&folder.folder_name)
        .bind(&tags)
        .bind(&folder.files)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, "folder inserted");
        Ok(row.into())
    }

    async fn delete_folder(&self, id: Uuid) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}
