//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and keeps the storage engine out of the domain
//! layer. Implementations map their own failures onto [`DomainError`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use cf_core::repositories::UserRepository;
/// use cf_core::domain::entities::user::User;
/// use cf_core::errors::DomainError;
///
/// struct FileUserRepository;
///
/// #[async_trait]
/// impl UserRepository for FileUserRepository {
///     async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn create(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
///
///     async fn update(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login email
    ///
    /// Emails are compared exactly as stored.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with that email
    /// * `Err(DomainError)` - The store could not answer
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - The store could not answer
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyExists))` - The email is taken;
    ///   this is the authoritative uniqueness check
    /// * `Err(DomainError)` - Any other store failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user's mutable fields (name, updated_at)
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user after the update
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such user
    /// * `Err(DomainError)` - Any other store failure
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
