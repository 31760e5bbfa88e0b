//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// In-memory user repository
///
/// Enforces email uniqueness inside `create` the way the database's unique
/// index does. Clones share the same backing map.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// True when no users are stored
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("in-memory user store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(stored) => {
                stored.name = user.name;
                stored.updated_at = user.updated_at;
                Ok(stored.clone())
            }
            None => Err(AuthError::UserNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), "Test".to_string())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("a@example.com")).await.unwrap();

        let by_email = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");

        assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("dup@example.com")).await.unwrap();

        let err = repo.create(user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyExists)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("Case@example.com")).await.unwrap();
        assert!(repo.find_by_email("case@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let err = repo.update(user("ghost@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_update_changes_name_only() {
        let repo = InMemoryUserRepository::new();
        let mut stored = repo.create(user("c@example.com")).await.unwrap();
        stored.rename("Carol".to_string());
        stored.email = "other@example.com".to_string();

        let updated = repo.update(stored).await.unwrap();
        assert_eq!(updated.name, "Carol");
        assert_eq!(updated.email, "c@example.com");
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let repo = InMemoryUserRepository::new();
        repo.set_unavailable(true);
        let err = repo.find_by_email("a@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::StoreUnavailable { .. }));

        repo.set_unavailable(false);
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
    }
}
