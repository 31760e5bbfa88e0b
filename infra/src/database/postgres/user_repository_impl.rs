//! Postgres implementation of the UserRepository trait.
//!
//! Email uniqueness is enforced by the `users_email_key` unique index; a
//! violation on insert is reported as `AuthError::EmailAlreadyExists`, which
//! is what settles two concurrent registrations for the same address.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use cf_core::domain::entities::user::User;
use cf_core::errors::{AuthError, DomainError};
use cf_core::repositories::UserRepository;

/// Postgres error code for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
    /// Deadline for each query
    query_timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: row
                .try_get::<Uuid, _>("id")
                .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::database(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::database(format!("Failed to get password_hash: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::database(format!("Failed to get name: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::database(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    /// Run one query under the configured deadline
    async fn timed<T, F>(&self, operation: &str, query: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(|e| map_sqlx_error(operation, e)),
            Err(_) => {
                tracing::warn!(
                    "Query {} exceeded {}ms deadline",
                    operation,
                    self.query_timeout.as_millis()
                );
                Err(DomainError::DeadlineExceeded {
                    operation: format!("database {}", operation),
                })
            }
        }
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AuthError::EmailAlreadyExists.into();
        }
    }
    tracing::error!("Database {} failed: {}", operation, err);
    DomainError::database(format!("{} failed: {}", operation, err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE email = $1
            LIMIT 1
        "#;

        let row = self
            .timed(
                "find_by_email",
                sqlx::query(query).bind(email).fetch_optional(&self.pool),
            )
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE id = $1
            LIMIT 1
        "#;

        let row = self
            .timed(
                "find_by_id",
                sqlx::query(query).bind(id).fetch_optional(&self.pool),
            )
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        self.timed(
            "create_user",
            sqlx::query(query)
                .bind(user.id)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.name)
                .bind(user.created_at)
                .bind(user.updated_at)
                .execute(&self.pool),
        )
        .await?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                name = $1,
                updated_at = $2
            WHERE id = $3
        "#;

        let result = self
            .timed(
                "update_user",
                sqlx::query(query)
                    .bind(&user.name)
                    .bind(user.updated_at)
                    .bind(user.id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }

        Ok(user)
    }
}
