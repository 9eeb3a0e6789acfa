//! Authentication service layer
//!
//! Business logic for registration, login, and token refresh. Identity
//! resolution for protected requests lives in the middleware; this service
//! covers the credential-facing half of the flow.

use super::jwt::{decode_token_of_use, issue_access_token, issue_refresh_token, TokenUse};
use super::models::{RegisterRequest, TokenPair, User, UserPublic};
use super::password::{hash_password, verify_password};
use super::repository::UserRepository;
use crate::error::AppError;
use sqlx::PgPool;
use tasklist_core::AuthConfig;
use validator::Validate;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    auth_config: AuthConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, auth_config: AuthConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            auth_config,
        }
    }

    /// Register a new user
    ///
    /// Duplicate username or email is rejected with 409. The stored row
    /// holds the Argon2id hash, never the plaintext.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserPublic, AppError> {
        request.validate()?;

        let existing = self
            .users
            .find_by_username_or_email(&request.username, &request.email)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "A user with this username or email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;

        let user = self
            .users
            .create(&request.username, &request.email, &password_hash)
            .await?;

        tracing::info!(username = %user.username, "registered new user");
        Ok(UserPublic::from(user))
    }

    /// Check a username/password pair against the credential store
    ///
    /// Returns `None` both when the username is unknown and when the
    /// password is wrong, so callers cannot enumerate accounts.
    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Login: verify credentials and mint an access/refresh token pair
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self
            .authenticate_user(username, password)
            .await?
            .ok_or(AppError::Unauthorized)?;

        self.issue_pair(&user)
    }

    /// Decode a refresh token and resolve its subject to a stored user
    ///
    /// Refresh tokens carry the email as subject, so the lookup path
    /// differs from access-token resolution.
    pub async fn validate_refresh_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let Ok(claims) = decode_token_of_use(&self.auth_config, token, TokenUse::Refresh) else {
            return Ok(None);
        };

        Ok(self.users.find_by_email(&claims.sub).await?)
    }

    /// Exchange a valid refresh token for a fresh token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let user = self
            .validate_refresh_token(refresh_token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        self.issue_pair(&user)
    }

    fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access = issue_access_token(&self.auth_config, &user.username)
            .map_err(|e| AppError::Internal(format!("Failed to issue access token: {e}")))?;
        let refresh = issue_refresh_token(&self.auth_config, &user.email)
            .map_err(|e| AppError::Internal(format!("Failed to issue refresh token: {e}")))?;

        Ok(TokenPair::bearer(access, refresh))
    }
}
