//! smolcms - Main Library
//!
//! smolcms is a small content-management backend. It exchanges a GitHub OAuth
//! code for a signed session token and manages "folder" documents.
//!
//! # Overview
//!
//! Every request runs through a reactive pipeline: a handler declares the
//! effects, outbound calls, log entries and response it needs as streams, and
//! a dispatcher executes them. Handlers never perform I/O themselves.
//!
//! # Module Structure
//!
//! - **`shared`** - Types independent of the HTTP layer
//!   - Folder document, field validation errors, configuration
//!
//! - **`backend`** - Server-side code
//!   - Effect runtime and HTTP call channel
//!   - Dispatch loop and handlers
//!   - Folder stores, session tokens, axum server
//!
//! # Usage
//!
//! ```rust,no_run
//! use smolcms::backend::server::create_app;
//! use smolcms::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::config::ConfigError` for invalid configuration
//! - `backend::error::RequestError` for anything that ends a request early
//! - `backend::error::BackendError` for startup failures

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
