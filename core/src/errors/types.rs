//! Error types for authentication and token handling

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Unknown email and wrong password share this variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

/// Token and authorization-gate errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No `Authorization` header, or not in `Bearer <token>` form
    #[error("Missing or malformed authorization header")]
    MissingCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    /// Signature verified but the subject is not a user id
    #[error("Invalid token claim: {claim}")]
    MalformedClaim { claim: String },

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::MissingCredentials => "MISSING_CREDENTIALS",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::MalformedClaim { .. } => "MALFORMED_CLAIM",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }

    /// True for failures of the verification step itself
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            TokenError::TokenExpired | TokenError::InvalidTokenFormat | TokenError::InvalidSignature
        )
    }
}
