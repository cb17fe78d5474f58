//! Shared Module
//!
//! This module contains types that do not depend on the HTTP layer: the
//! folder document, field validation errors and the application
//! configuration. They are used by the server and by integration tests.
//!
//! # Overview
//!
//! All serializable types use the JSON shapes the client application sees.

/// Folder document
pub mod folder;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Environment};
pub use error::{FieldError, SharedError};
pub use folder::Folder;
