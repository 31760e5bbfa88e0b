//! Configuration for the authentication service

use cf_shared::config::SessionConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// TTL of the session record written on register/login, in seconds
    pub session_ttl_seconds: u64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 86400,
        }
    }
}

impl From<&SessionConfig> for AuthServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            session_ttl_seconds: config.session_ttl,
        }
    }
}
