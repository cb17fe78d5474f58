//! Application configuration module
//!
//! Configuration is read once at startup from environment variables (a `.env`
//! file is loaded first by the server binary). Any missing or malformed
//! required value is reported as a [`ConfigError`] so the process aborts before
//! it starts accepting requests.
//!
//! # Variables
//!
//! | Variable               | Required | Default                  |
//! |------------------------|----------|--------------------------|
//! | `GH_CLIENT_ID`         | yes      |                          |
//! | `GH_CLIENT_SECRET`     | yes      |                          |
//! | `SECRET`               | yes      |                          |
//! | `PORT`                 | no       | `8080`                   |
//! | `DATABASE_URL`         | no       | in-memory folder store   |
//! | `STATIC_DIR`           | no       | `dist`                   |
//! | `APP_ENV`              | no       | `production`             |
//! | `GH_OAUTH_URL`         | no       | `https://github.com`     |
//! | `GH_API_URL`           | no       | `https://api.github.com` |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                     |
//! | `HTTP_TIMEOUT_SECS`    | no       | `10`                     |

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://github.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GitHub OAuth application client id
    pub gh_client_id: String,
    /// GitHub OAuth application client secret
    pub gh_client_secret: String,
    /// Key used to sign session tokens
    pub secret: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Postgres connection string; `None` selects the in-memory folder store
    pub database_url: Option<String>,
    /// Directory holding the built client application
    pub static_dir: PathBuf,
    pub environment: Environment,
    /// Base URL of the OAuth provider (authorize and token endpoints)
    pub oauth_base_url: String,
    /// Base URL of the provider's REST API (user profile endpoint)
    pub api_base_url: String,
    /// Deadline for a request's effect graph to produce a response
    pub request_timeout: Duration,
    /// Timeout applied to every outbound HTTP call
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(value) = lookup("GH_CLIENT_ID") {
            builder = builder.gh_client_id(value);
        }
        if let Some(value) = lookup("GH_CLIENT_SECRET") {
            builder = builder.gh_client_secret(value);
        }
        if let Some(value) = lookup("SECRET") {
            builder = builder.secret(value);
        }
        if let Some(value) = lookup("PORT") {
            let port = value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?;
            builder = builder.port(port);
        }
        if let Some(value) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.database_url(value);
        }
        if let Some(value) = lookup("STATIC_DIR") {
            builder = builder.static_dir(value);
        }
        if let Some(value) = lookup("APP_ENV") {
            builder = builder.environment(Environment::parse(&value));
        }
        if let Some(value) = lookup("GH_OAUTH_URL") {
            builder = builder.oauth_base_url(value);
        }
        if let Some(value) = lookup("GH_API_URL") {
            builder = builder.api_base_url(value);
        }
        if let Some(value) = lookup("REQUEST_TIMEOUT_SECS") {
            builder = builder.request_timeout(parse_secs("REQUEST_TIMEOUT_SECS", value)?);
        }
        if let Some(value) = lookup("HTTP_TIMEOUT_SECS") {
            builder = builder.http_timeout(parse_secs("HTTP_TIMEOUT_SECS", value)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("GH_CLIENT_ID", &self.gh_client_id)?;
        require("GH_CLIENT_SECRET", &self.gh_client_secret)?;
        require("SECRET", &self.secret)?;

        for (key, url) in [
            ("GH_OAUTH_URL", &self.oauth_base_url),
            ("GH_API_URL", &self.api_base_url),
        ] {
            reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(format!("{key}={url}")))?;
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    gh_client_id: Option<String>,
    gh_client_secret: Option<String>,
    secret: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    static_dir: Option<PathBuf>,
    environment: Option<Environment>,
    oauth_base_url: Option<String>,
    api_base_url: Option<String>,
    request_timeout: Option<Duration>,
    http_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    pub fn gh_client_id(mut self, value: impl Into<String>) -> Self {
        self.gh_client_id = Some(value.into());
        self
    }

    pub fn gh_client_secret(mut self, value: impl Into<String>) -> Self {
        self.gh_client_secret = Some(value.into());
        self
    }

    pub fn secret(mut self, value: impl Into<String>) -> Self {
        self.secret = Some(value.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn oauth_base_url(mut self, url: impl Into<String>) -> Self {
        self.oauth_base_url = Some(url.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            gh_client_id: self.gh_client_id.ok_or(ConfigError::MissingValue("GH_CLIENT_ID"))?,
            gh_client_secret: self
                .gh_client_secret
                .ok_or(ConfigError::MissingValue("GH_CLIENT_SECRET"))?,
            secret: self.secret.ok_or(ConfigError::MissingValue("SECRET"))?,
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            static_dir: self
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            environment: self.environment.unwrap_or_default(),
            oauth_base_url: trim_base(
                self.oauth_base_url
                    .unwrap_or_else(|| DEFAULT_OAUTH_BASE_URL.to_string()),
            ),
            api_base_url: trim_base(
                self.api_base_url
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            ),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            http_timeout: self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

fn require(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue(key));
    }
    Ok(())
}

fn parse_secs(key: &'static str, value: String) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("GH_CLIENT_ID", "client-id"),
        ("GH_CLIENT_SECRET", "client-secret"),
        ("SECRET", "signing-secret"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database_url, None);
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.oauth_base_url, DEFAULT_OAUTH_BASE_URL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&REQUIRED[..2]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingValue("SECRET"));
    }

    #[test]
    fn test_blank_client_id_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[
            ("GH_CLIENT_ID", "  "),
            ("GH_CLIENT_SECRET", "client-secret"),
            ("SECRET", "signing-secret"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingValue("GH_CLIENT_ID"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let result = AppConfig::from_lookup(lookup(&pairs));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: "PORT", .. })));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "9966"),
            ("APP_ENV", "development"),
            ("GH_OAUTH_URL", "http://127.0.0.1:4000/"),
            ("DATABASE_URL", ""),
            ("HTTP_TIMEOUT_SECS", "3"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9966);
        assert!(config.is_development());
        assert_eq!(config.oauth_base_url, "http://127.0.0.1:4000");
        assert_eq!(config.database_url, None);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = AppConfig::builder()
            .gh_client_id("id")
            .gh_client_secret("secret")
            .secret("key")
            .api_base_url("not a url")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }
}
