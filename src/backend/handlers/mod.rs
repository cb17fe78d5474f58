//! Request Handlers
//!
//! Each handler implements [`Handler`](crate::backend::dispatch::Handler):
//! it turns a request into sinks and never performs I/O itself.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs            - Module exports and documentation
//! ├── validation.rs     - Required-field checks for JSON bodies
//! ├── folders.rs        - GET/POST /api/folders
//! ├── oauth.rs          - POST /api/oauth
//! └── client_config.rs  - GET /api/config
//! ```
//!
//! # Tags
//!
//! Every handler module exposes a `tags` submodule naming the effect tags and
//! HTTP categories it uses. Tags only need to be unique within one handler,
//! since every request gets its own runtimes.

/// Body validation helpers
pub mod validation;

/// Folder list and create handlers
pub mod folders;

/// OAuth code exchange handler
pub mod oauth;

/// Client configuration handler
pub mod client_config;

pub use client_config::ClientConfig;
pub use folders::{CreateFolder, ListFolders};
pub use oauth::OAuthExchange;
