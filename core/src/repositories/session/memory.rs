//! In-memory session store with TTL semantics

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::DomainError;

use super::trait_::{revocation_key, session_key, SessionStore, REVOCATION_RETENTION_SECONDS};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Session store backed by a map with per-key expiry
///
/// Mirrors the key layout of the Redis store (`token:<t>`, `blacklist:<t>`).
/// Expiry follows `tokio::time`, so paused-clock tests can advance it.
/// Clones share state.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// User a live session record points at
    pub async fn session_owner(&self, token: &str) -> Option<Uuid> {
        let entries = self.entries.read().await;
        entries
            .get(&session_key(token))
            .filter(|e| e.is_live())
            .and_then(|e| Uuid::parse_str(&e.value).ok())
    }

    /// Remaining lifetime of a live key, if any
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| e.is_live())
            .map(|e| e.expires_at - Instant::now())
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::session_store("in-memory session store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn store_session(
        &self,
        token: &str,
        user_id: Uuid,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        entries.insert(session_key(token), Entry::new(user_id.to_string(), ttl_seconds));
        Ok(())
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        entries.insert(
            revocation_key(token),
            Entry::new("1".to_string(), REVOCATION_RETENTION_SECONDS),
        );
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries
            .get(&revocation_key(token))
            .map(|e| e.is_live())
            .unwrap_or(false))
    }
}
