//! Authentication service module
//!
//! This module provides the session lifecycle and its guard:
//! - User registration and login with bcrypt-hashed passwords
//! - Session token issuance and recording
//! - Logout by revocation
//! - Profile lookup and update
//! - The authorization gate protecting user-scoped operations

mod config;
mod gate;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use gate::{extract_bearer_token, AuthenticatedUser, Authenticator, AuthorizationGate};
pub use service::AuthService;
