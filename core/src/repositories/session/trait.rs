//! Session store trait: issued-token bookkeeping and the revocation registry.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// How long a revocation entry is kept, independent of the token's own expiry
pub const REVOCATION_RETENTION_SECONDS: u64 = 86400;

/// Key of the issued-session record for `token`
pub fn session_key(token: &str) -> String {
    format!("token:{}", token)
}

/// Key of the revocation entry for `token`
pub fn revocation_key(token: &str) -> String {
    format!("blacklist:{}", token)
}

/// Key-value registry of issued and revoked session tokens
///
/// Two key families are kept apart: `token:<t>` maps an issued token to its
/// user, `blacklist:<t>` marks a token as revoked. Every operation is a single
/// command, and any backend failure surfaces as
/// [`DomainError::StoreUnavailable`] or [`DomainError::DeadlineExceeded`].
/// Callers never retry and never treat a failure as "not revoked".
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record `token` as issued to `user_id`, expiring after `ttl_seconds`
    ///
    /// Overwrites silently; storing the same token twice is harmless.
    async fn store_session(
        &self,
        token: &str,
        user_id: Uuid,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    /// Add `token` to the revocation registry for [`REVOCATION_RETENTION_SECONDS`]
    ///
    /// Idempotent. The token's validity is not checked.
    async fn revoke(&self, token: &str) -> Result<(), DomainError>;

    /// True when a revocation entry for `token` exists
    ///
    /// A missing key is `Ok(false)`, never an error.
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;
}
