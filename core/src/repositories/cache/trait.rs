//! Key-value cache interface with per-entry time-to-live.
//!
//! Revocation markers and memoized users are stored through this trait.
//! Values are JSON so that any backend (in-process map, Redis) can hold
//! them without knowing the concrete principal type.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::DomainResult;

/// Deferred computation handed to [`CacheStore::remember`]
pub type CacheProducer<'a> =
    Pin<Box<dyn Future<Output = DomainResult<Option<Value>>> + Send + 'a>>;

/// Cache collaborator
///
/// TTLs are expressed in minutes. Implementations must treat an expired
/// entry exactly like an absent one.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use tg_core::errors::DomainResult;
/// use tg_core::repositories::CacheStore;
///
/// struct NullCache;
///
/// #[async_trait]
/// impl CacheStore for NullCache {
///     async fn get(&self, _key: &str) -> DomainResult<Option<Value>> {
///         Ok(None)
///     }
///
///     async fn put(&self, _key: &str, _value: Value, _ttl_minutes: u64) -> DomainResult<()> {
///         Ok(())
///     }
///
///     async fn forget(&self, _key: &str) -> DomainResult<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Entry present and not expired
    /// * `Ok(None)` - Absent or expired
    /// * `Err(DomainError::Cache)` - Backend failure
    async fn get(&self, key: &str) -> DomainResult<Option<Value>>;

    /// Store an entry that expires after `ttl_minutes`
    async fn put(&self, key: &str, value: Value, ttl_minutes: u64) -> DomainResult<()>;

    /// Remove an entry; removing an absent key is not an error
    async fn forget(&self, key: &str) -> DomainResult<()>;

    /// Get-or-compute-and-store
    ///
    /// On a hit the producer is dropped without being polled. On a miss the
    /// producer runs and a `Some` result is stored with `ttl_minutes`; a
    /// `None` result is returned as-is and never cached.
    async fn remember<'a>(
        &'a self,
        key: &'a str,
        ttl_minutes: u64,
        producer: CacheProducer<'a>,
    ) -> DomainResult<Option<Value>> {
        if let Some(hit) = self.get(key).await? {
            return Ok(Some(hit));
        }

        let produced = producer.await?;
        if let Some(value) = &produced {
            self.put(key, value.clone(), ttl_minutes).await?;
        }
        Ok(produced)
    }
}
