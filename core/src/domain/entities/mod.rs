//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, DEFAULT_TOKEN_EXPIRY_SECONDS, JWT_ISSUER};
pub use user::{User, UserProfile};
