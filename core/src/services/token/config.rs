//! Configuration for the token service

use std::str::FromStr;

use cf_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{DEFAULT_TOKEN_EXPIRY_SECONDS, JWT_ISSUER};
use crate::errors::{DomainError, DomainResult};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Issuer written into and required on every token
    pub issuer: String,
    /// Token validity window in seconds
    pub token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT settings
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Internal {
            message: format!("Unsupported JWT algorithm: {}", config.algorithm),
        })?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            issuer: config.issuer.clone(),
            token_expiry_seconds: config.token_expiry,
        })
    }

    /// Use a different secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }
}
