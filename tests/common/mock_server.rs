//! Mock GitHub helpers
//!
//! `ScriptedHttpClient` answers outbound calls by category without any
//! network and records every call it sees. `mount_github` sets up a wiremock
//! server that behaves like the two GitHub endpoints the OAuth exchange uses.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use smolcms::backend::http::{HttpCallDescriptor, HttpCallError, HttpClient, HttpResponse};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
pub struct ScriptedHttpClient {
    script: Mutex<HashMap<String, Result<HttpResponse, String>>>,
    calls: Mutex<Vec<HttpCallDescriptor>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls of `category` with `status` and `body`
    pub fn respond(self, category: &str, status: u16, body: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(category.to_string(), Ok(HttpResponse::new(status, body)));
        self
    }

    /// Fail calls of `category` at the transport level
    pub fn fail(self, category: &str, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(category.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<HttpCallDescriptor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.category).collect()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(&self, call: &HttpCallDescriptor) -> Result<HttpResponse, HttpCallError> {
        self.calls.lock().unwrap().push(call.clone());

        match self.script.lock().unwrap().get(&call.category) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(HttpCallError::new(&call.category, message.as_str())),
            None => Err(HttpCallError::new(&call.category, "no scripted response")),
        }
    }
}

pub const GITHUB_ACCESS_TOKEN: &str = "gho_integration";

pub fn github_user() -> Value {
    json!({ "login": "octocat", "id": 583231, "name": "The Octocat" })
}

/// Mount the token and user endpoints; the user endpoint answers `user_status`
pub async fn mount_github(server: &MockServer, user_status: u16) {
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(query_param("client_id", "test-client-id"))
        .and(query_param("code", "good-code"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": GITHUB_ACCESS_TOKEN,
            "token_type": "bearer",
            "scope": ""
        })))
        .expect(1)
        .mount(server)
        .await;

    let user_response = if user_status == 200 {
        ResponseTemplate::new(200).set_body_json(github_user())
    } else {
        ResponseTemplate::new(user_status).set_body_json(json!({ "message": "Bad credentials" }))
    };

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header(
            "authorization",
            format!("token {}", GITHUB_ACCESS_TOKEN).as_str(),
        ))
        .respond_with(user_response)
        .expect(1)
        .mount(server)
        .await;
}
