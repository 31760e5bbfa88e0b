//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use cf_shared::config::MAX_TOKEN_EXPIRY_SECONDS;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies session tokens
///
/// Implementations are pure and safe to share across request tasks.
pub trait TokenCodec: Send + Sync {
    /// Sign a new session token for `user_id`
    fn issue(&self, user_id: Uuid) -> DomainResult<String>;

    /// Check signature and expiry, returning the claims
    ///
    /// Fails with `TokenError::InvalidSignature`, `TokenError::TokenExpired`
    /// or `TokenError::InvalidTokenFormat`. Revocation is not consulted.
    fn verify(&self, token: &str) -> DomainResult<Claims>;
}

/// HMAC-signed JWT codec
///
/// Keys are derived once from the configured secret at construction.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `DomainError::Internal` when the secret is
    /// empty, the algorithm is not one of HS256/HS384/HS512, or the expiry
    /// is outside `1..=MAX_TOKEN_EXPIRY_SECONDS`
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Internal {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !(1..=MAX_TOKEN_EXPIRY_SECONDS).contains(&config.token_expiry_seconds) {
            return Err(DomainError::Internal {
                message: format!(
                    "JWT token expiry must be between 1 and {} seconds, got {}",
                    MAX_TOKEN_EXPIRY_SECONDS, config.token_expiry_seconds
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issue a token as if it had been issued at `issued_at`
    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> DomainResult<String> {
        let claims = Claims::new_session(
            user_id,
            self.config.issuer.as_str(),
            issued_at,
            self.config.token_expiry_seconds,
        )
        .map_err(|e| {
            tracing::error!(
                expiry_seconds = self.config.token_expiry_seconds,
                "Session token expiry out of range"
            );
            DomainError::Token(e)
        })?;
        self.encode_claims(&claims)
    }

    /// Sign arbitrary claims with this service's key
    pub fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Token validity window in seconds
    pub fn token_expiry_seconds(&self) -> i64 {
        self.config.token_expiry_seconds
    }
}

impl TokenCodec for TokenService {
    fn issue(&self, user_id: Uuid) -> DomainResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::InvalidTokenFormat,
                };
                tracing::debug!(reason = ?e.kind(), "Session token rejected");
                DomainError::Token(err)
            })
    }
}
