//! Tasklist Core - Configuration and shared types
//!
//! This crate holds what the rest of the workspace needs before any HTTP
//! or database code runs:
//! - Application configuration with env-var and TOML file loading
//! - Configuration error types

pub mod config;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig};
