/**
 * Client Configuration Handler
 *
 * `GET /api/config` tells the client application where to send users to
 * start the OAuth flow. Derived from configuration only; declares no effects.
 */
use futures_util::stream::{self, StreamExt};
use reqwest::Url;
use serde_json::json;

use crate::backend::dispatch::{ApiRequest, Handler, LogEntry, ResponseEnvelope, Sinks, Sources};
use crate::shared::config::AppConfig;

/// `GET /api/config`
#[derive(Debug, Default)]
pub struct ClientConfig;

impl ClientConfig {
    pub fn new() -> Self {
        Self
    }
}

/// Authorize URL for the configured OAuth application
pub fn oauth_url(config: &AppConfig) -> String {
    let base = format!("{}/login/oauth/authorize", config.oauth_base_url);
    match Url::parse_with_params(&base, &[("client_id", config.gh_client_id.as_str())]) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::warn!("Failed to encode authorize URL: {}", e);
            format!("{}?client_id={}", base, config.gh_client_id)
        }
    }
}

impl Handler for ClientConfig {
    fn name(&self) -> &'static str {
        "client_config"
    }

    fn handle(&self, _request: &ApiRequest, config: &AppConfig, _sources: Sources) -> Sinks {
        let envelope = ResponseEnvelope::ok(json!({ "oauthUrl": oauth_url(config) }))
            .with_content_type("application/json");

        let finished = LogEntry::info([format!(
            "Config request finished with status: {}",
            envelope.status.as_u16()
        )]);
        let log = stream::iter([LogEntry::info(["Config request received"]), finished]);

        Sinks::new(stream::iter([envelope])).with_log(log.boxed())
    }
}
