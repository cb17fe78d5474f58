/**
 * HTTP Client Implementations
 *
 * `HttpClient` is the seam between the call channel and the network. The
 * server uses `ReqwestClient`; tests substitute scripted clients.
 */
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::http::descriptor::{HttpCallDescriptor, HttpCallError, HttpResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Performs one declared call
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send `call` and return whatever the server answered
    ///
    /// Implementations must return `Err` only for transport failures; any
    /// HTTP status, including 4xx and 5xx, is an `Ok` response.
    async fn send(&self, call: &HttpCallDescriptor) -> Result<HttpResponse, HttpCallError>;
}

/// `HttpClient` backed by a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client applying `timeout` to every request
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, call: &HttpCallDescriptor) -> Result<HttpResponse, HttpCallError> {
        let mut request = self.client.request(call.method.clone(), &call.url);
        for (name, value) in &call.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpCallError::new(&call.category, describe(&e)))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| {
            HttpCallError::new(&call.category, describe(&e))
                .with_response(HttpResponse::new(status, Value::Null))
        })?;

        Ok(HttpResponse::new(status, decode_body(&bytes)))
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}

/// JSON when the body parses, otherwise the text itself
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
