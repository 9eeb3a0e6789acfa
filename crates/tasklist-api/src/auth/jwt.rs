//! JWT token issuance and validation
//!
//! Implements HMAC-SHA256 signed access and refresh tokens. Access tokens
//! are short-lived and carry the username as subject; refresh tokens are
//! long-lived and carry the email as subject. Tokens are never persisted -
//! validity is solely a function of signature and expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tasklist_core::AuthConfig;
use thiserror::Error;
use uuid::Uuid;

/// Token class, embedded as a claim so an access token can never stand in
/// for a refresh token or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// JWT claims
///
/// For access tokens `sub` is the username; for refresh tokens it is the
/// email address (carried over from the original token design).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username (access) or email (refresh)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
    /// Token class
    pub token_use: TokenUse,
}

/// Token issuance and validation errors
///
/// The distinction between expired and tampered tokens exists for logging
/// only; clients always see a uniform rejection.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token format")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token is not a {0:?} token")]
    WrongTokenUse(TokenUse),
}

fn issue_token(
    config: &AuthConfig,
    subject: &str,
    token_use: TokenUse,
    ttl: Duration,
) -> Result<String, JwtError> {
    let now = Utc::now();

    let claims = Claims {
        sub: subject.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
        token_use,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Issue a short-lived access token for `username`
pub fn issue_access_token(config: &AuthConfig, username: &str) -> Result<String, JwtError> {
    issue_token(
        config,
        username,
        TokenUse::Access,
        Duration::minutes(config.access_expiry_mins),
    )
}

/// Issue a long-lived refresh token for `email`
pub fn issue_refresh_token(config: &AuthConfig, email: &str) -> Result<String, JwtError> {
    issue_token(
        config,
        email,
        TokenUse::Refresh,
        Duration::days(config.refresh_expiry_days),
    )
}

/// Verify signature and expiry, returning the decoded claims
///
/// Any failure is total rejection; there is no partial trust in a token
/// that fails validation.
pub fn decode_token(config: &AuthConfig, token: &str) -> Result<Claims, JwtError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Decode a token and require it to be of the given class
pub fn decode_token_of_use(
    config: &AuthConfig,
    token: &str,
    expected: TokenUse,
) -> Result<Claims, JwtError> {
    let claims = decode_token(config, token)?;
    if claims.token_use != expected {
        return Err(JwtError::WrongTokenUse(expected));
    }
    Ok(claims)
}
