//! Business services containing domain logic and use cases.

pub mod auth;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{
    extract_bearer_token, AuthService, AuthServiceConfig, AuthenticatedUser, Authenticator,
    AuthorizationGate,
};
pub use password::CredentialHasher;
pub use token::{TokenCodec, TokenService, TokenServiceConfig};
