//! # Cashflow Core
//!
//! Core business logic and domain layer for the Cashflow backend.
//! This crate contains the user and token entities, the authentication
//! services, the repository interfaces they depend on, and the error types
//! shared by every layer above.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
