/**
 * Response Envelopes and Log Entries
 *
 * The two kinds of value a handler emits for the caller and for the log.
 */
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Value};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Outgoing response produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status: StatusCode,
    /// Defaults to `application/json` when written
    pub content_type: Option<String>,
    pub body: Value,
}

impl ResponseEnvelope {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: None,
            body,
        }
    }

    /// 200 with a JSON body
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// `{message}` body with the given status
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }

    /// Generic 500 that reveals nothing about the cause
    pub fn internal_error() -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(true, |ct| ct.starts_with(DEFAULT_CONTENT_TYPE))
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let bytes = match (&self.body, self.is_json()) {
            (Value::String(text), false) => text.clone().into_bytes(),
            (body, _) => match serde_json::to_vec(body) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!("Failed to serialize response body: {:?}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
                }
            },
        };

        (self.status, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
    }
}

/// Severity of a handler log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A log line declared by a handler
///
/// `args` keeps the loggable values apart so callers can assert on them;
/// they are joined with spaces when written.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub args: Vec<Value>,
}

impl LogEntry {
    pub fn new<I, V>(level: LogLevel, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            level,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn info<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(LogLevel::Info, args)
    }

    pub fn warn<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(LogLevel::Warn, args)
    }

    pub fn error<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(LogLevel::Error, args)
    }

    /// Arguments joined by spaces; strings are written bare, everything else as JSON
    pub fn render(&self) -> String {
        self.args
            .iter()
            .map(|arg| match arg {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write the entry to the active tracing subscriber
    pub fn write(&self) {
        let line = self.render();
        match self.level {
            LogLevel::Info => tracing::info!("{}", line),
            LogLevel::Warn => tracing::warn!("{}", line),
            LogLevel::Error => tracing::error!("{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_envelope_response() {
        let response = ResponseEnvelope::ok(json!({ "token": "abc" })).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), br#"{"token":"abc"}"#);
    }

    #[tokio::test]
    async fn test_text_envelope_is_written_raw() {
        let response = ResponseEnvelope::new(StatusCode::OK, json!("<html></html>"))
            .with_content_type("text/html")
            .into_response();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), b"<html></html>");
    }

    #[test]
    fn test_internal_error_body() {
        let envelope = ResponseEnvelope::internal_error();
        assert_eq!(envelope.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.body, json!({ "message": "internal server error" }));
    }

    #[test]
    fn test_log_entry_render() {
        let entry = LogEntry::error([json!(401), json!({ "message": "Bad credentials" })]);
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.render(), r#"401 {"message":"Bad credentials"}"#);

        let entry = LogEntry::info(["creating folder: Docs"]);
        assert_eq!(entry.render(), "creating folder: Docs");
    }
}
