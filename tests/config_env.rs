//! Configuration loading from the process environment

use std::time::Duration;

use assert_matches::assert_matches;
use serial_test::serial;
use smolcms::shared::config::{ConfigError, Environment};
use smolcms::shared::AppConfig;

const VARS: &[&str] = &[
    "GH_CLIENT_ID",
    "GH_CLIENT_SECRET",
    "SECRET",
    "PORT",
    "DATABASE_URL",
    "STATIC_DIR",
    "APP_ENV",
    "GH_OAUTH_URL",
    "GH_API_URL",
    "REQUEST_TIMEOUT_SECS",
    "HTTP_TIMEOUT_SECS",
];

fn reset_env(values: &[(&str, &str)]) {
    for var in VARS {
        std::env::remove_var(var);
    }
    for (key, value) in values {
        std::env::set_var(key, value);
    }
}

const REQUIRED: &[(&str, &str)] = &[
    ("GH_CLIENT_ID", "client-id"),
    ("GH_CLIENT_SECRET", "client-secret"),
    ("SECRET", "signing-key"),
];

#[test]
#[serial]
fn test_defaults() {
    reset_env(REQUIRED);

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.gh_client_id, "client-id");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_url, None);
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.oauth_base_url, "https://github.com");
    assert_eq!(config.api_base_url, "https://api.github.com");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_overrides() {
    let mut values = REQUIRED.to_vec();
    values.extend([
        ("PORT", "3000"),
        ("APP_ENV", "development"),
        ("GH_API_URL", "http://localhost:9000/"),
        ("REQUEST_TIMEOUT_SECS", "5"),
    ]);
    reset_env(&values);

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.port, 3000);
    assert!(config.is_development());
    assert_eq!(config.api_base_url, "http://localhost:9000");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_missing_secret_aborts() {
    reset_env(&REQUIRED[..2]);

    assert_matches!(AppConfig::from_env(), Err(ConfigError::MissingValue("SECRET")));
}

#[test]
#[serial]
fn test_invalid_port_aborts() {
    let mut values = REQUIRED.to_vec();
    values.push(("PORT", "not-a-port"));
    reset_env(&values);

    assert_matches!(
        AppConfig::from_env(),
        Err(ConfigError::InvalidValue { key: "PORT", .. })
    );
}
