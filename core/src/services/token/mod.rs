//! Token service module for JWT management
//!
//! This module handles issuing and verifying signed session tokens. It is
//! pure: nothing here touches the session store, so verification never
//! mutates state.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{TokenCodec, TokenService};
