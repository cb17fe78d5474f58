//! Folder Persistence
//!
//! Folders are the documents the CMS manages. Handlers never call a store
//! directly; they wrap store calls in effect descriptors so the dispatcher
//! decides when (and whether) they run.
//!
//! # Module Structure
//!
//! ```text
//! folders/
//! ├── mod.rs       - Module exports and documentation
//! ├── store.rs     - FolderStore trait and StorageError
//! ├── memory.rs    - In-process store
//! └── postgres.rs  - PostgreSQL store (sqlx)
//! ```
//!
//! # Backends
//!
//! - **`PgFolderStore`** - Used when `DATABASE_URL` is set and reachable
//! - **`MemoryFolderStore`** - Used otherwise, and by tests
//!
//! Both are safe for concurrent use from many requests.

/// Store trait and error type
pub mod store;

/// In-memory store
pub mod memory;

/// PostgreSQL store
pub mod postgres;

pub use memory::MemoryFolderStore;
pub use postgres::PgFolderStore;
pub use store::{FolderStore, StorageError};
