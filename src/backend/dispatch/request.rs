/**
 * Incoming Request
 *
 * `ApiRequest` is the only view of the HTTP request a handler gets: method,
 * path and the already parsed JSON body. Extraction fails with a ready-made
 * `ResponseEnvelope` so malformed bodies never reach a handler.
 */
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use crate::backend::dispatch::envelope::ResponseEnvelope;

/// A request as seen by handlers
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Correlates every log line written for this request
    pub id: Uuid,
    pub method: Method,
    pub path: String,
    /// Parsed JSON body, `Value::Null` when the body is empty
    pub body: Value,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            path: path.into(),
            body,
        }
    }
}

impl<S> FromRequest<S> for ApiRequest
where
    S: Send + Sync,
{
    type Rejection = ResponseEnvelope;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ResponseEnvelope::message(rejection.status(), rejection.body_text()))?;

        Ok(Self::new(method, path, parse_body(&bytes)?))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, ResponseEnvelope> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!("Rejected malformed request body: {}", e);
        ResponseEnvelope::message(StatusCode::BAD_REQUEST, format!("invalid JSON body: {}", e))
    })
}
