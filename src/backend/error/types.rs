/**
 * Backend Error Types
 *
 * # Request Errors
 *
 * `RequestError` is the taxonomy handlers map failures into. Each variant
 * knows its status code; `conversion.rs` turns it into an envelope and a log
 * entry.
 *
 * # Startup Errors
 *
 * `BackendError` covers everything that can go wrong before the server
 * accepts its first request: configuration, database connection, the HTTP
 * client and binding the listener. Failed migrations are logged, not fatal.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::effects::EffectError;
use crate::backend::http::{HttpCallError, HttpResponse};
use crate::shared::config::ConfigError;
use crate::shared::error::FieldError;

/// Errors that end a single request
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// The request body failed schema validation
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The OAuth provider answered, but not with what the stage needs
    #[error("{category} call failed: {message}")]
    UpstreamCall {
        /// Category of the failed call
        category: String,
        message: String,
        /// The provider's answer, when there was one
        response: Option<HttpResponse>,
    },

    /// A persistence or signing effect failed
    #[error(transparent)]
    Effect(#[from] EffectError),

    /// An outbound call failed at the transport level
    #[error(transparent)]
    Transport(#[from] HttpCallError),
}

impl RequestError {
    /// Upstream failure carrying the provider's response
    pub fn upstream(category: impl Into<String>, response: HttpResponse) -> Self {
        Self::UpstreamCall {
            category: category.into(),
            message: format!("unexpected response with status {}", response.status),
            response: Some(response),
        }
    }

    /// Reclassify a transport failure of a known provider call as upstream
    pub fn upstream_transport(error: HttpCallError) -> Self {
        Self::UpstreamCall {
            category: error.category,
            message: error.message,
            response: error.response,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamCall { .. } | Self::Effect(_) | Self::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The provider response attached to this error, if any
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::UpstreamCall { response, .. } => response.as_ref(),
            Self::Transport(error) => error.response.as_ref(),
            Self::Validation(_) | Self::Effect(_) => None,
        }
    }
}

/// Errors that prevent the server from starting
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
