//! Authentication Module
//!
//! The server does not manage users itself. A user proves their identity to
//! GitHub; the OAuth exchange handler then issues a session token signed with
//! the configured secret.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! └── sessions.rs     - Session token signing and verification
//! ```
//!
//! # Security
//!
//! - Tokens are HS256 JWTs signed with `SECRET`
//! - Tokens expire six hours after issue
//! - No route currently requires a token; `verify_session` is provided for
//!   callers that do

/// Session token management
pub mod sessions;

pub use sessions::{sign_session, verify_session, SessionClaims, SignedClaims};
