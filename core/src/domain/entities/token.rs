//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Session token validity window (24 hours)
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 86400;

/// JWT issuer
pub const JWT_ISSUER: &str = "cashflow";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, random per token so two tokens issued in the same second differ
    pub jti: String,
}

impl Claims {
    /// Creates session claims for `user_id` valid for `expiry_seconds` from `issued_at`
    ///
    /// Fails with `TokenGenerationFailed` when the expiry is not representable.
    pub fn new_session(
        user_id: Uuid,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        expiry_seconds: i64,
    ) -> Result<Self, TokenError> {
        let expiry = Duration::try_seconds(expiry_seconds)
            .and_then(|window| issued_at.checked_add_signed(window))
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
