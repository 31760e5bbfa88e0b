//! Authorization gate: turns an `Authorization` header into an authenticated user.
//!
//! The checks run in a fixed order and stop at the first failure:
//! header shape, token verification, subject parsing, then revocation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{DomainResult, TokenError};
use crate::repositories::SessionStore;
use crate::services::token::TokenCodec;

/// Identity established by the gate for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    /// The raw bearer token, kept so logout can revoke it
    pub token: String,
}

/// Anything that can authenticate a raw `Authorization` header value
///
/// Object safe so transport layers can hold it as `Arc<dyn Authenticator>`.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, authorization: Option<&str>) -> DomainResult<AuthenticatedUser>;
}

/// Token-plus-revocation gate
pub struct AuthorizationGate<S, T>
where
    S: SessionStore,
    T: TokenCodec,
{
    session_store: Arc<S>,
    token_codec: Arc<T>,
    check_revocation: bool,
}

impl<S, T> AuthorizationGate<S, T>
where
    S: SessionStore,
    T: TokenCodec,
{
    pub fn new(session_store: Arc<S>, token_codec: Arc<T>) -> Self {
        Self {
            session_store,
            token_codec,
            check_revocation: true,
        }
    }

    /// Skip the revocation lookup. Logged-out tokens then pass until they expire.
    pub fn with_revocation_check(mut self, enabled: bool) -> Self {
        self.check_revocation = enabled;
        self
    }
}

#[async_trait]
impl<S, T> Authenticator for AuthorizationGate<S, T>
where
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    async fn authenticate(&self, authorization: Option<&str>) -> DomainResult<AuthenticatedUser> {
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or(TokenError::MissingCredentials)?;

        let claims = self.token_codec.verify(token)?;

        let user_id = claims.user_id().map_err(|_| TokenError::MalformedClaim {
            claim: "sub".to_string(),
        })?;

        if self.check_revocation && self.session_store.is_revoked(token).await? {
            tracing::debug!(user_id = %user_id, "Rejected revoked session token");
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(AuthenticatedUser {
            user_id,
            token: token.to_string(),
        })
    }
}

/// Extract the token from a `Bearer <token>` header value
///
/// The value must be exactly two space-separated parts with the literal
/// scheme `Bearer`. Anything else, including an empty token, is `None`.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}
