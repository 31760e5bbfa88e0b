//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, session lifetime and password hashing
//! - `cache` - Redis connection used for sessions and revocations
//! - `database` - Postgres connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordConfig, SessionConfig, MAX_TOKEN_EXPIRY_SECONDS};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
///
/// Built once at startup and handed to the constructors that need it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Every section reads its own variables and falls back to its defaults,
    /// so a missing `.env` still yields a runnable development setup.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let cors = match environment {
            Environment::Development => CorsConfig::development(),
            _ => CorsConfig::from_env(),
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors,
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check the loaded configuration for settings that must not reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if !self.auth.jwt.has_valid_expiry() {
            return Err(format!(
                "JWT token expiry must be between 1 and {} seconds",
                MAX_TOKEN_EXPIRY_SECONDS
            ));
        }
        if self.auth.session.session_ttl == 0 {
            return Err("Session TTL must be greater than zero".to_string());
        }
        Ok(())
    }
}
