//! Backend Module
//!
//! This module contains all server-side code: the reactive request pipeline,
//! the handlers built on it, persistence and the axum server around them.
//!
//! # Architecture
//!
//! - **`effects`** - Effect descriptors and the per-request effect runtime
//! - **`http`** - Outbound call descriptors, the call channel and transports
//! - **`streams`** - Stream combinators shared by the runtimes and handlers
//! - **`dispatch`** - Handler contract and the dispatch loop
//! - **`handlers`** - Folder, OAuth and client-config handlers
//! - **`folders`** - Folder persistence (Postgres and in-memory)
//! - **`auth`** - Session token signing
//! - **`server`** - Application state and initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── streams.rs      - Stream combinators
//! ├── effects/        - Effect runtime
//! ├── http/           - HTTP call channel
//! ├── dispatch/       - Dispatch loop
//! ├── handlers/       - Request handlers
//! ├── folders/        - Folder stores
//! ├── auth/           - Session tokens
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! axum route ─► ApiRequest ─► Dispatcher ─► Handler::handle ─► Sinks
//!                                 │                              │
//!                                 ├── EffectRuntime ◄── effect ──┤
//!                                 ├── HttpChannel   ◄── http ────┤
//!                                 ├── tracing       ◄── log ─────┤
//!                                 └── first envelope ◄─ response ┘
//! ```
//!
//! Handlers are pure: they only declare work. Runtimes and channels are
//! created fresh for every request, so outcomes never leak between requests.
//!
//! # Thread Safety
//!
//! - The folder store and the HTTP client are shared and `Send + Sync`
//! - Everything else a request touches is owned by its dispatch loop

/// Stream combinators
pub mod streams;

/// Effect runtime
pub mod effects;

/// Outbound HTTP call channel
pub mod http;

/// Handler contract and dispatch loop
pub mod dispatch;

/// Request handlers
pub mod handlers;

/// Folder persistence
pub mod folders;

/// Session tokens
pub mod auth;

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use dispatch::{Dispatcher, Handler};
pub use error::{BackendError, RequestError};
pub use server::{build_app, create_app};
