pub mod auth;

pub use auth::{LoginRequest, RegisterRequest, UpdateProfileRequest};
