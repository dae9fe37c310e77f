//! Redis cache implementation
//!
//! Values are stored as JSON strings with `SET .. EX`, so Redis expires
//! revocation markers and cached users on its own. Every key is passed
//! through `CacheConfig::make_key`, which keeps the engine's keys apart from
//! anything else sharing the instance.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use serde_json::Value;
use tg_core::errors::DomainResult;
use tg_core::repositories::CacheStore;
use tg_shared::config::CacheConfig;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::InfrastructureError;

/// Redis-backed `CacheStore` with connection retry and operation retry
///
/// Cloning is cheap: clones share one multiplexed connection.
#[derive(Clone)]
pub struct RedisCache {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisCache {
    /// Connects to the Redis instance named by `config.url`
    ///
    /// # Returns
    /// * `Ok(RedisCache)` - Connected client
    /// * `Err(InfrastructureError::Config)` - URL could not be parsed
    /// * `Err(InfrastructureError::Cache)` - Still unreachable after `max_retries` attempts
    ///
    /// # Example
    /// ```no_run
    /// use tg_infra::cache::RedisCache;
    /// use tg_shared::config::CacheConfig;
    ///
    /// async fn connect() -> Result<RedisCache, Box<dyn std::error::Error>> {
    ///     let cache = RedisCache::new(CacheConfig::redis("redis://localhost:6379")).await?;
    ///     Ok(cache)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis cache");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::connect_with_retry(&client, &config).await?;
        info!("Redis cache connected");

        Ok(Self { connection, config })
    }

    async fn connect_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_retries = config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let attempt = timeout(
                Duration::from_secs(config.connection_timeout),
                client.get_multiplexed_async_connection(),
            )
            .await;

            match attempt {
                Ok(Ok(connection)) => return Ok(connection),
                Ok(Err(e)) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                }
                Err(_) if attempts < max_retries => {
                    warn!(
                        "Redis connection timed out (attempt {}/{}). Retrying in {}ms...",
                        attempts, max_retries, delay
                    );
                }
                Ok(Err(e)) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
                Err(_) => {
                    error!("Redis connection timed out after {} attempts", attempts);
                    return Err(InfrastructureError::Timeout(config.connection_timeout));
                }
            }

            sleep(Duration::from_millis(delay)).await;
            // Exponential backoff with cap at 5 seconds
            delay = (delay * 2).min(5000);
        }
    }

    /// Checks connectivity with `PING`
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;
        Ok(response == "PONG")
    }

    async fn read(&self, key: &str) -> Result<Option<Value>, InfrastructureError> {
        let key = self.config.make_key(key);
        let raw = self
            .execute_with_retry(|mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => {
                debug!(key = %key, "Cache miss");
                Ok(None)
            }
        }
    }

    async fn write(&self, key: &str, value: &Value, ttl_minutes: u64) -> Result<(), InfrastructureError> {
        let key = self.config.make_key(key);
        let payload = serde_json::to_string(value)?;
        let seconds = ttl_minutes.max(1).saturating_mul(60);

        self.execute_with_retry(|mut conn| {
            let key = key.clone();
            let payload = payload.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, payload, seconds).await })
        })
        .await?;

        debug!(key = %key, ttl_minutes, "Cached entry");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), InfrastructureError> {
        let key = self.config.make_key(key);
        self.execute_with_retry(|mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.del::<_, u32>(key).await })
        })
        .await?;
        Ok(())
    }

    /// Runs a Redis operation, retrying transient failures with exponential backoff
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let max_retries = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        Ok(self.read(key).await?)
    }

    async fn put(&self, key: &str, value: Value, ttl_minutes: u64) -> DomainResult<()> {
        Ok(self.write(key, &value, ttl_minutes).await?)
    }

    async fn forget(&self, key: &str) -> DomainResult<()> {
        Ok(self.delete(key).await?)
    }
}

/// Whether a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Masks credentials in a Redis URL for logging
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
