pub mod session;
pub mod user;

pub use session::{
    revocation_key, session_key, InMemorySessionStore, SessionStore, REVOCATION_RETENTION_SECONDS,
};
pub use user::{InMemoryUserRepository, UserRepository};
