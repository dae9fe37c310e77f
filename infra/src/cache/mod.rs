//! Cache backends for revocation markers and memoized users
//!
//! Both backends implement `tg_core::repositories::CacheStore`; which one is
//! used is decided by `CacheConfig::backend`.

pub mod memory;
#[cfg(feature = "redis-cache")]
pub mod redis_client;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tg_core::repositories::CacheStore;
use tg_shared::config::{CacheBackend, CacheConfig};
use tracing::info;

use crate::InfrastructureError;

pub use memory::MemoryCache;
#[cfg(feature = "redis-cache")]
pub use redis_client::RedisCache;

/// Builds the configured cache backend
///
/// # Errors
/// * `InfrastructureError::Config` - Redis selected but support not compiled in, or bad URL
/// * `InfrastructureError::Cache` - Redis unreachable after all retries
pub async fn build_cache(config: &CacheConfig) -> Result<Arc<dyn CacheStore>, InfrastructureError> {
    match config.backend {
        CacheBackend::Memory => {
            info!("Using in-process cache");
            Ok(Arc::new(MemoryCache::new()))
        }
        #[cfg(feature = "redis-cache")]
        CacheBackend::Redis => Ok(Arc::new(RedisCache::new(config.clone()).await?)),
        #[cfg(not(feature = "redis-cache"))]
        CacheBackend::Redis => Err(InfrastructureError::Config(
            "Redis cache requested but the redis-cache feature is disabled".to_string(),
        )),
    }
}
