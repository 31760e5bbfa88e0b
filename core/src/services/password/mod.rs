//! Password hashing for stored credentials.

mod hasher;

pub use hasher::{CredentialHasher, MAX_PASSWORD_BYTES};
