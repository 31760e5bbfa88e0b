//! Redis cache client implementation
//!
//! This module provides a Redis client over a single multiplexed connection.
//! Connecting retries with backoff at startup; after that every command runs
//! once under the configured response deadline and failures are returned to
//! the caller as-is.

use redis::{
    aio::MultiplexedConnection, AsyncCommands, Client, ConnectionInfo, IntoConnectionInfo,
    RedisResult,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use cf_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis cache client with a per-command deadline
///
/// Cheap to clone; clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Deadline applied to every command
    response_timeout: Duration,
}

impl RedisClient {
    /// Connect to Redis, retrying up to 3 times with backoff
    ///
    /// # Example
    /// ```no_run
    /// use cf_infra::cache::RedisClient;
    /// use cf_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379");
    ///     let client = RedisClient::connect(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::connect_with_retry_config(config, 3, 100).await
    }

    /// Connect with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of connection attempts
    /// * `retry_delay_ms` - Base delay between attempts in milliseconds
    pub async fn connect_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(connection_info(&config)?).map_err(|e| {
            error!("Failed to create Redis client: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let connection =
            Self::create_connection_with_retry(client, connect_timeout, max_retries, retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            response_timeout: Duration::from_millis(config.response_timeout_ms),
            config,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout {
                    operation: "redis connect".to_string(),
                }),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Apply the configured key prefix
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Set a value with expiration time (`SET key value EX seconds`)
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key with expiry {}s", expiry_seconds);

        let mut conn = self.connection.clone();
        let result = self
            .with_deadline("SET", async move {
                conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await
            })
            .await;

        if let Err(e) = &result {
            error!("Failed to set key: {}", e);
        }
        result
    }

    /// Get a value, `None` when the key is missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let result = self
            .with_deadline("GET", async move { conn.get::<_, Option<String>>(key).await })
            .await;

        if let Err(e) = &result {
            error!("Failed to get key: {}", e);
        }
        result
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let mut conn = self.connection.clone();
        let result = self
            .with_deadline("PING", async move {
                redis::cmd("PING").query_async::<_, String>(&mut conn).await
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(e)
            }
        }
    }

    /// Run one command under the response deadline
    async fn with_deadline<T, F>(
        &self,
        operation: &str,
        command: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.response_timeout, command).await {
            Ok(result) => result.map_err(InfrastructureError::Cache),
            Err(_) => {
                warn!(
                    "Redis {} exceeded {}ms deadline",
                    operation,
                    self.response_timeout.as_millis()
                );
                Err(InfrastructureError::Timeout {
                    operation: format!("redis {}", operation),
                })
            }
        }
    }
}

/// Parse the configured URL, selecting `config.database` when it is non-zero
///
/// A database number in the URL path is kept when the config leaves it at 0.
pub(crate) fn connection_info(
    config: &CacheConfig,
) -> Result<ConnectionInfo, InfrastructureError> {
    let mut info = config.url.as_str().into_connection_info().map_err(|e| {
        error!("Failed to parse Redis URL: {}", e);
        InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
    })?;

    if config.database != 0 {
        info.redis.db = i64::from(config.database);
    }
    Ok(info)
}

/// Mask sensitive parts of Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
