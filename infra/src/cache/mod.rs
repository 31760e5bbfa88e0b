//! Cache module for Redis-based storage
//!
//! This module provides the Redis client and the session registry built on it.

pub mod redis_client;
pub mod session_store;


pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use cf_shared::config::CacheConfig;
