//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Cashflow backend,
//! following Clean Architecture principles. It provides the concrete stores
//! behind the repository traits defined in `cf_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: Postgres implementations using SQLx, plus migrations
//! - **Cache**: Redis client and the Redis-backed session store

use cf_core::errors::DomainError;

/// Database module - Postgres implementations using SQLx
pub mod database;

/// Cache module - Redis client and session registry
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A backend call did not answer within its deadline
    #[error("Timed out during {operation}")]
    Timeout { operation: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Timeout { operation } => DomainError::DeadlineExceeded { operation },
            InfrastructureError::Cache(e) => DomainError::session_store(e.to_string()),
            InfrastructureError::Database(e) => DomainError::database(e.to_string()),
            InfrastructureError::Migration(e) => DomainError::database(e.to_string()),
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_deadline() {
        let err: DomainError = InfrastructureError::Timeout {
            operation: "GET".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::DeadlineExceeded { ref operation } if operation == "GET"));
    }

    #[test]
    fn test_cache_error_maps_to_store_unavailable() {
        let redis_err = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        let err: DomainError = InfrastructureError::Cache(redis_err).into();
        assert!(matches!(err, DomainError::StoreUnavailable { ref store, .. } if store == "session store"));
        assert!(err.is_internal());
    }

    #[test]
    fn test_config_error_is_internal() {
        let err: DomainError = InfrastructureError::Config("bad url".to_string()).into();
        assert!(err.is_internal());
    }
}
