//! Authentication and tenant identity
//!
//! JWT-based authentication with the following components:
//! - Token issuance and validation (access and refresh classes)
//! - Password hashing with Argon2
//! - Middleware that resolves the bearer token to a stored user
//! - Service layer for registration, login, and refresh
//! - Repository layer for the credential store

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;

pub use jwt::{decode_token, issue_access_token, issue_refresh_token, Claims, JwtError, TokenUse};
pub use middleware::{auth_middleware, AuthError, CurrentUser};
pub use models::{LoginForm, RefreshRequest, RegisterRequest, TokenPair, User, UserPublic};
pub use password::{hash_password, verify_password};
pub use repository::UserRepository;
pub use service::AuthService;
