//! Redis-backed session registry
//!
//! Issued tokens live under `token:<t>` with the session TTL, revocations
//! under `blacklist:<t>` for a fixed retention window. Both families go
//! through the client's key prefix.

use async_trait::async_trait;
use uuid::Uuid;

use cf_core::errors::DomainError;
use cf_core::repositories::{revocation_key, session_key, SessionStore, REVOCATION_RETENTION_SECONDS};

use super::redis_client::RedisClient;

/// Redis implementation of [`SessionStore`]
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn store_session(
        &self,
        token: &str,
        user_id: Uuid,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let key = self.client.key(&session_key(token));
        self.client
            .set_with_expiry(&key, &user_id.to_string(), ttl_seconds)
            .await?;
        Ok(())
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let key = self.client.key(&revocation_key(token));
        self.client
            .set_with_expiry(&key, "1", REVOCATION_RETENTION_SECONDS)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let key = self.client.key(&revocation_key(token));
        Ok(self.client.get(&key).await?.is_some())
    }
}
