//! Server Module
//!
//! This module wires configuration, persistence and the outbound HTTP client
//! into an axum application.
//!
//! # Architecture
//!
//! - **`state`** - `AppState`, shared by every route
//! - **`config`** - Database and folder store selection
//! - **`init`** - Application assembly
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and the handler set
//! ├── config.rs       - Database loading and store selection
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Persistence**: connect to Postgres and migrate, or fall back to the
//!    in-memory store when `DATABASE_URL` is unset
//! 2. **HTTP Client**: build the shared reqwest client
//! 3. **State Creation**: one dispatcher and one instance of every handler
//! 4. **Router Creation**: API routes, static files and middleware
//!
//! Nothing in `AppState` is per-request. Per-request runtimes are created by
//! the dispatcher.

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_app, create_app};
pub use state::{AppState, Handlers};
