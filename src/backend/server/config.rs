/**
 * Server Configuration
 *
 * This module selects the folder store from the application configuration.
 *
 * # Error Handling
 *
 * A missing `DATABASE_URL` is not an error: the server runs on the
 * in-memory store. A `DATABASE_URL` that cannot be connected to aborts
 * startup. Failed migrations are logged and the server continues, since the
 * schema may already be current.
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::folders::{FolderStore, MemoryFolderStore, PgFolderStore};
use crate::shared::config::AppConfig;

/// Connect to the configured database and run migrations
///
/// # Returns
///
/// - `Ok(Some(PgPool))` if the database is configured and reachable
/// - `Ok(None)` if `DATABASE_URL` is not set
/// - `Err` if the connection fails
pub async fn load_database(config: &AppConfig) -> Result<Option<PgPool>, BackendError> {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Folders will be kept in memory.");
            return Ok(None);
        }
    };

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(Some(pool))
}

/// Pick the folder store for this process
pub async fn load_folder_store(config: &AppConfig) -> Result<Arc<dyn FolderStore>, BackendError> {
    let store: Arc<dyn FolderStore> = match load_database(config).await? {
        Some(pool) => Arc::new(PgFolderStore::new(pool)),
        None => Arc::new(MemoryFolderStore::new()),
    };
    Ok(store)
}
