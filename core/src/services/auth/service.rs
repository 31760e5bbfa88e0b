//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserProfile};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SessionStore, UserRepository};
use crate::services::password::CredentialHasher;
use crate::services::token::TokenCodec;

use super::config::AuthServiceConfig;

/// Authentication service for managing the session lifecycle
///
/// Per (user, token) the lifecycle is Anonymous, then Authenticated(token)
/// after register/login, then Revoked after logout. A user may hold any
/// number of live tokens at once.
pub struct AuthService<U, S, T>
where
    U: UserRepository,
    S: SessionStore,
    T: TokenCodec,
{
    /// User repository for account records
    user_repository: Arc<U>,
    /// Registry of issued and revoked tokens
    session_store: Arc<S>,
    /// Token issuer
    token_codec: Arc<T>,
    /// Password hasher
    hasher: CredentialHasher,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, S, T> AuthService<U, S, T>
where
    U: UserRepository,
    S: SessionStore,
    T: TokenCodec,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        session_store: Arc<S>,
        token_codec: Arc<T>,
        hasher: CredentialHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_store,
            token_codec,
            hasher,
            config,
        }
    }

    /// Create an account and start its first session
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailAlreadyExists` - the email is taken, either seen by
    ///   the lookup or rejected by the store's uniqueness constraint
    /// * `StoreUnavailable` / `DeadlineExceeded` / `Hashing` - internal failures.
    ///   If recording the session fails the created user is kept.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> DomainResult<AuthResponse> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            tracing::debug!("Registration rejected: email already registered");
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = User::new(email.to_string(), password_hash, name.to_string());
        let user = self.user_repository.create(user).await?;

        let access_token = self.start_session(user.id).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(AuthResponse::new(access_token, &user))
    }

    /// Check credentials and start a new session
    ///
    /// Unknown email and wrong password both yield
    /// `AuthError::InvalidCredentials`. Earlier sessions stay valid.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(password, &user.password_hash).await {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.start_session(user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthResponse::new(access_token, &user))
    }

    /// Revoke `token`
    ///
    /// The token is not verified first; revoking an unknown, expired or
    /// already revoked token succeeds.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.session_store.revoke(token).await?;
        tracing::info!("Session token revoked");
        Ok(())
    }

    /// Public profile of `user_id`
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        let user = self.find_user(user_id).await?;
        Ok(user.profile())
    }

    /// Change the display name of `user_id`
    pub async fn update_profile(&self, user_id: Uuid, name: &str) -> DomainResult<UserProfile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation {
                message: "Name is required".to_string(),
            });
        }

        let mut user = self.find_user(user_id).await?;
        user.rename(name.to_string());
        let user = self.user_repository.update(user).await?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user.profile())
    }

    async fn find_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Issue a token and record it in the session store
    async fn start_session(&self, user_id: Uuid) -> DomainResult<String> {
        let token = self.token_codec.issue(user_id)?;
        self.session_store
            .store_session(&token, user_id, self.config.session_ttl_seconds)
            .await?;
        Ok(token)
    }
}
