//! Backend Error Module
//!
//! This module defines the error types of the server. Two families exist:
//! errors that end a single request, and errors that stop the server from
//! starting at all.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Conversions into response envelopes and log entries
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `RequestError` - Anything that ends a request with a non-200 status
//!   - `Validation` - Bad request shape (400, never logged as an error)
//!   - `UpstreamCall` - OAuth provider answered with a failure (500)
//!   - `Effect` - Persistence or signing failed (500)
//!   - `Transport` - An outbound call never got an answer (500)
//! - `BackendError` - Startup failures returned from `main`
//!
//! # Response Mapping
//!
//! A `RequestError` becomes exactly one `ResponseEnvelope`. Validation errors
//! carry the full field list back to the client. Everything else is a 500,
//! either with the error message or, for the OAuth exchange, with a generic
//! body that hides provider detail.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, RequestError};
