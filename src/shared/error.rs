//! Shared Error Types
//!
//! This module defines error types that describe bad input independent of the
//! HTTP layer. They are serializable so a request handler can hand the full
//! list straight back to the client.
//!
//! # Error Categories
//!
//! - `FieldError` - A single field that failed validation
//! - `SharedError::ValidationError` - One or more field errors for a body
//!
//! # Usage
//!
//! ```rust
//! use smolcms::shared::error::{FieldError, SharedError};
//!
//! let error = SharedError::validation(vec![FieldError::required("data.code")]);
//! assert!(error.to_string().contains("1 field"));
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field that failed validation
///
/// Field paths are rooted at `data`, so a missing top-level `code` property is
/// reported as `data.code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the offending field
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field is absent (or `null`)
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }

    /// The field is present but has the wrong JSON type
    pub fn wrong_type(field: impl Into<String>) -> Self {
        Self::new(field, "is the wrong type")
    }
}

/// Shared error types that describe invalid client input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Request body failed schema validation
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationError {
        /// Every field that failed, in schema order
        errors: Vec<FieldError>,
    },
}

impl SharedError {
    /// Create a new validation error from a list of field errors
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }
}
