//! Domain-specific error types and error handling.
//!
//! Errors here describe what went wrong in business terms only. Turning them
//! into status codes is the transport layer's job.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A backing store (database, key-value registry) failed or is unreachable
    #[error("{store} unavailable: {message}")]
    StoreUnavailable { store: String, message: String },

    /// A backing store call did not finish within its deadline
    #[error("Deadline exceeded during {operation}")]
    DeadlineExceeded { operation: String },

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a database failure
    pub fn database(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            store: "database".to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a session registry failure
    pub fn session_store(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            store: "session store".to_string(),
            message: message.into(),
        }
    }

    /// True for failures whose cause must stay server-side
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable { .. }
                | DomainError::DeadlineExceeded { .. }
                | DomainError::Hashing { .. }
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::TokenGenerationFailed)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
