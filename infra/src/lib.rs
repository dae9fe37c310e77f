//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the token engine depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: in-process and Redis implementations of `CacheStore`
//! - **Users**: a static, bcrypt-backed `UserProvider`
//! - **Config**: layered configuration loading (`.env`, config file, environment)
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis cache backend (default)

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Cache module - `CacheStore` implementations
pub mod cache;

/// Configuration loading
pub mod config;

/// User provider implementations
pub mod users;

pub use cache::{build_cache, MemoryCache};
#[cfg(feature = "redis-cache")]
pub use cache::RedisCache;
pub use config::load_config;
pub use users::{StaticUser, StaticUserProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be read or merged
    #[error("Configuration error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// Cached value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Backend did not answer in time
    #[error("Timed out after {0}s")]
    Timeout(u64),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::configuring(message),
            InfrastructureError::ConfigSource(e) => DomainError::configuring(e.to_string()),
            InfrastructureError::Hashing(e) => DomainError::user_provider(e.to_string()),
            other => DomainError::cache(other.to_string()),
        }
    }
}
