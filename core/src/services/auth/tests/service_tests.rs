//! Unit tests for authentication service

use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemorySessionStore, InMemoryUserRepository, SessionStore, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, Authenticator};
use crate::services::password::CredentialHasher;
use crate::services::token::TokenCodec;

use super::mocks::*;

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_register_returns_token_and_profile() {
    let h = harness();

    let response = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();

    assert_eq!(response.user.email, "alice@x.io");
    assert_eq!(response.user.name, "Alice");

    let claims = h.tokens.verify(&response.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), response.user.id);
    assert_eq!(
        h.sessions.session_owner(&response.access_token).await,
        Some(response.user.id)
    );
}

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    let h = harness();
    let response = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();

    let stored = h.users.find_by_id(response.user.id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret123");
    assert!(CredentialHasher::new(4).verify("secret123", &stored.password_hash).await);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let h = harness();
    h.service.register("bob@x.io", "secret123", "Bob").await.unwrap();

    let err = h
        .service
        .register("bob@x.io", "another1", "Bobby")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyExists)));
    assert_eq!(h.users.len().await, 1);
}

#[tokio::test]
async fn test_register_race_caught_by_unique_constraint() {
    let inner = InMemoryUserRepository::new();
    let users = Arc::new(BlindLookupRepository { inner: inner.clone() });
    let sessions = Arc::new(InMemorySessionStore::new());
    let service = AuthService::new(
        users,
        sessions,
        token_service(TEST_SECRET),
        CredentialHasher::new(4),
        AuthServiceConfig::default(),
    );

    service.register("race@x.io", "secret123", "First").await.unwrap();
    let err = service
        .register("race@x.io", "secret123", "Second")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyExists)));
    assert_eq!(inner.len().await, 1);
}

#[tokio::test]
async fn test_register_lookup_failure_propagates() {
    let h = harness();
    h.users.set_unavailable(true);

    let err = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
}

#[tokio::test]
async fn test_register_session_failure_keeps_user() {
    let h = harness();
    h.sessions.set_unavailable(true);

    let err = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
    assert!(h.users.find_by_email("alice@x.io").await.unwrap().is_some());
}

#[tokio::test]
async fn test_login_success_issues_fresh_token() {
    let h = harness();
    let registered = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();

    let logged_in = h.service.login("alice@x.io", "secret123").await.unwrap();

    assert_eq!(logged_in.user.id, registered.user.id);
    assert_ne!(logged_in.access_token, registered.access_token);
    assert_eq!(
        h.sessions.session_owner(&logged_in.access_token).await,
        Some(registered.user.id)
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness();
    h.service.register("alice@x.io", "secret123", "Alice").await.unwrap();

    let wrong_password = h.service.login("alice@x.io", "wrong-pass").await.unwrap_err();
    let unknown_email = h.service.login("nobody@x.io", "secret123").await.unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_login_is_additive() {
    let h = harness();
    let first = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();
    let second = h.service.login("alice@x.io", "secret123").await.unwrap();

    assert!(h.gate.authenticate(Some(&bearer(&first.access_token))).await.is_ok());
    assert!(h.gate.authenticate(Some(&bearer(&second.access_token))).await.is_ok());
}

#[tokio::test]
async fn test_logout_revokes_only_that_token() {
    let h = harness();
    let first = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();
    let second = h.service.login("alice@x.io", "secret123").await.unwrap();

    h.service.logout(&first.access_token).await.unwrap();

    let err = h
        .gate
        .authenticate(Some(&bearer(&first.access_token)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
    assert!(h.gate.authenticate(Some(&bearer(&second.access_token))).await.is_ok());
}

#[tokio::test]
async fn test_logout_is_idempotent_and_skips_validation() {
    let h = harness();

    h.service.logout("garbage-token").await.unwrap();
    h.service.logout("garbage-token").await.unwrap();
    assert!(h.sessions.is_revoked("garbage-token").await.unwrap());
}

#[tokio::test]
async fn test_logout_store_failure_propagates() {
    let h = harness();
    h.sessions.set_unavailable(true);

    let err = h.service.logout("any").await.unwrap_err();
    assert!(err.is_internal());
}

#[tokio::test]
async fn test_get_profile() {
    let h = harness();
    let registered = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();

    let profile = h.service.get_profile(registered.user.id).await.unwrap();
    assert_eq!(profile, registered.user);

    let err = h.service.get_profile(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_update_profile_renames() {
    let h = harness();
    let registered = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();

    let profile = h
        .service
        .update_profile(registered.user.id, "  Alicia ")
        .await
        .unwrap();
    assert_eq!(profile.name, "Alicia");
    assert_eq!(profile.email, "alice@x.io");

    let reloaded = h.service.get_profile(registered.user.id).await.unwrap();
    assert_eq!(reloaded.name, "Alicia");
}

#[tokio::test]
async fn test_update_profile_rejects_blank_name() {
    let h = harness();
    let registered = h
        .service
        .register("alice@x.io", "secret123", "Alice")
        .await
        .unwrap();

    let err = h
        .service
        .update_profile(registered.user.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_update_profile_unknown_user() {
    let h = harness();
    let err = h
        .service
        .update_profile(Uuid::new_v4(), "Ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}
