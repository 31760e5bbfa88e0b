//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Longest accepted session token lifetime (one year)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 365 * 86400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token validity window in seconds
    pub token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            token_expiry: 86400, // 24 hours
            issuer: String::from("cashflow"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.token_expiry = hours * 3600;
        self
    }

    /// True when the token lifetime is within `1..=MAX_TOKEN_EXPIRY_SECONDS`
    pub fn has_valid_expiry(&self) -> bool {
        (1..=MAX_TOKEN_EXPIRY_SECONDS).contains(&self.token_expiry)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Session bookkeeping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// TTL of the `token:<t>` session record in seconds
    pub session_ttl: u64,

    /// Consult the revocation registry when authorizing requests
    #[serde(default = "default_check_revocation")]
    pub check_revocation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_ttl: 86400, // 24 hours
            check_revocation: default_check_revocation(),
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.jwt.secret);
        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer);
        let session_ttl = std::env::var("SESSION_TTL")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);
        let check_revocation = std::env::var("SESSION_CHECK_REVOCATION")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            jwt: JwtConfig {
                secret,
                token_expiry,
                issuer,
                algorithm: default_algorithm(),
            },
            session: SessionConfig {
                session_ttl,
                check_revocation,
            },
            password: PasswordConfig { bcrypt_cost },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_check_revocation() -> bool {
    true
}
