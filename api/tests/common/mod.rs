//! Shared wiring for API integration tests: the real app over in-memory stores

use std::sync::Arc;

use actix_web::web;
use cf_api::routes::auth::AppState;
use cf_core::repositories::{InMemorySessionStore, InMemoryUserRepository};
use cf_core::services::password::CredentialHasher;
use cf_core::services::token::{TokenService, TokenServiceConfig};
use cf_shared::config::{AppConfig, SessionConfig};

pub const TEST_SECRET: &str = "api-test-secret";

pub type TestState = AppState<InMemoryUserRepository, InMemorySessionStore, TokenService>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub tokens: Arc<TokenService>,
    pub config: AppConfig,
}

pub fn token_service(secret: &str) -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig::default().with_secret(secret)).unwrap())
}

pub fn test_context() -> TestContext {
    test_context_with(SessionConfig::default())
}

pub fn test_context_with(session: SessionConfig) -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let tokens = token_service(TEST_SECRET);

    let state = web::Data::new(AppState::new(
        users.clone(),
        sessions.clone(),
        tokens.clone(),
        CredentialHasher::new(4),
        &session,
    ));

    TestContext {
        state,
        users,
        sessions,
        tokens,
        config: AppConfig::development(),
    }
}

impl TestContext {
    /// Register through the service and return the session token
    pub async fn register(&self, email: &str, password: &str, name: &str) -> String {
        self.state
            .auth_service
            .register(email, password, name)
            .await
            .unwrap()
            .access_token
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
