//! Mock implementation of CacheStore for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, DomainResult};

use super::trait_::CacheStore;

/// In-memory cache that records the TTL of every write and never expires anything
#[derive(Default)]
pub struct MockCacheStore {
    entries: Arc<RwLock<HashMap<String, (Value, u64)>>>,
    failing: AtomicBool,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a cache error
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Value and TTL (minutes) stored under `key`
    pub async fn entry(&self, key: &str) -> Option<(Value, u64)> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    fn check(&self) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::cache("mock cache unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        self.check()?;
        Ok(self.entries.read().await.get(key).map(|(v, _)| v.clone()))
    }

    async fn put(&self, key: &str, value: Value, ttl_minutes: u64) -> DomainResult<()> {
        self.check()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, ttl_minutes));
        Ok(())
    }

    async fn forget(&self, key: &str) -> DomainResult<()> {
        self.check()?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
