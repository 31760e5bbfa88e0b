//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Registration and login
//! - Logout (revokes the presented token)
//! - Profile lookup and update for the authenticated user

pub mod login;
pub mod logout;
pub mod profile;
pub mod register;

use std::sync::Arc;

use cf_core::repositories::{SessionStore, UserRepository};
use cf_core::services::auth::{AuthService, AuthServiceConfig, Authenticator, AuthorizationGate};
use cf_core::services::password::CredentialHasher;
use cf_core::services::token::TokenCodec;
use cf_shared::config::SessionConfig;

/// Application state that holds shared services
pub struct AppState<U, S, T>
where
    U: UserRepository,
    S: SessionStore,
    T: TokenCodec,
{
    pub auth_service: Arc<AuthService<U, S, T>>,
    /// Gate used by the authentication middleware
    pub authenticator: Arc<dyn Authenticator>,
}

impl<U, S, T> AppState<U, S, T>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    /// Wire the service and the gate over the same session store and token codec
    pub fn new(
        user_repository: Arc<U>,
        session_store: Arc<S>,
        token_codec: Arc<T>,
        hasher: CredentialHasher,
        session: &SessionConfig,
    ) -> Self {
        let gate = AuthorizationGate::new(session_store.clone(), token_codec.clone())
            .with_revocation_check(session.check_revocation);

        let auth_service = AuthService::new(
            user_repository,
            session_store,
            token_codec,
            hasher,
            AuthServiceConfig::from(session),
        );

        Self {
            auth_service: Arc::new(auth_service),
            authenticator: Arc::new(gate),
        }
    }
}
