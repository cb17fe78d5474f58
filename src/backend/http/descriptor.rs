/**
 * HTTP Call Descriptors and Outcomes
 *
 * Declarative description of an outbound call plus the correlated result the
 * channel publishes once the call settles.
 */
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A declared outbound HTTP call
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCallDescriptor {
    /// Correlation label; several calls may share one
    pub category: String,
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON request body
    pub body: Option<Value>,
}

impl HttpCallDescriptor {
    pub fn new(category: impl Into<String>, method: Method, url: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(category: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(category, Method::GET, url)
    }

    pub fn post(category: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(category, Method::POST, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First header value matching `name`, case-insensitively
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response received from a remote server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body, or the raw text as a string when it is not JSON
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure of an outbound call
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{category} call failed: {message}")]
pub struct HttpCallError {
    pub category: String,
    pub message: String,
    /// Response, when the failure happened after one was received
    pub response: Option<HttpResponse>,
}

impl HttpCallError {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            response: None,
        }
    }

    pub fn with_response(mut self, response: HttpResponse) -> Self {
        self.response = Some(response);
        self
    }
}

/// The single outcome of one call: a response or a transport error
#[derive(Debug, Clone, PartialEq)]
pub struct HttpOutcome {
    pub category: String,
    pub result: Result<HttpResponse, HttpCallError>,
}

impl HttpOutcome {
    pub fn response(&self) -> Option<&HttpResponse> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&HttpCallError> {
        self.result.as_ref().err()
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}
