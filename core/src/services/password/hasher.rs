//! bcrypt-backed credential hasher

use cf_shared::config::PasswordConfig;

use crate::errors::{DomainError, DomainResult};

/// bcrypt only reads this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes and checks passwords with bcrypt
///
/// Both operations are CPU-bound and run on the blocking pool so request
/// tasks keep moving.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Salted one-way hash of `plaintext`
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are a validation error;
    /// otherwise fails only on internal problems (bad cost, worker panic).
    pub async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::Validation {
                message: format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES),
            });
        }

        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::Hashing {
                message: format!("hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Hashing {
                message: e.to_string(),
            })
    }

    /// True when `plaintext` matches `hash`
    ///
    /// A mismatch, an unparsable stored hash or a password longer than
    /// [`MAX_PASSWORD_BYTES`] yields `false`.
    pub async fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();

        match tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
