/**
 * Session Tokens
 *
 * This module signs the session token issued at the end of the OAuth
 * exchange. The token is an HS256 JWT carrying the GitHub profile and access
 * token, valid for six hours.
 */
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How long an issued session token stays valid
pub const SESSION_TTL_HOURS: i64 = 6;

/// Session payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// GitHub user profile as returned by `GET /user`
    pub user_info: Value,
    /// GitHub access token for the user
    pub access_token: String,
}

/// Claims as they appear inside the signed token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedClaims {
    #[serde(flatten)]
    pub session: SessionClaims,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Sign a session token issued now
///
/// # Arguments
/// * `claims` - User profile and access token
/// * `secret` - Signing key
///
/// # Returns
/// JWT token string
pub fn sign_session(claims: &SessionClaims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    sign_session_at(claims, secret, Utc::now())
}

/// Sign a session token as if issued at `issued_at`
pub fn sign_session_at(
    claims: &SessionClaims,
    secret: &str,
    issued_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expires_at = issued_at + Duration::hours(SESSION_TTL_HOURS);

    let signed = SignedClaims {
        session: claims.clone(),
        iat: unix_seconds(issued_at),
        exp: unix_seconds(expires_at),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &signed, &key)
}

/// Verify and decode a session token
///
/// Fails when the signature does not match `secret` or the token expired.
pub fn verify_session(token: &str, secret: &str) -> Result<SignedClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<SignedClaims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

fn unix_seconds(at: DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp()).unwrap_or(0)
}
