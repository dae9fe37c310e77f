//! In-process cache with per-entry expiry
//!
//! Suitable for a single node. Entries live in a map behind an async
//! `RwLock`; expired entries are skipped on read and swept on write.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tg_core::errors::DomainResult;
use tg_core::repositories::CacheStore;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

// Keeps `Instant` arithmetic clear of overflow
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

struct Entry {
    value: Value,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// `CacheStore` backed by a process-local map
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: Value, ttl_minutes: u64) -> DomainResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_live(now));

        // A zero TTL would be dead on arrival
        if ttl_minutes == 0 {
            entries.remove(key);
            return Ok(());
        }

        let expires_at = now + Duration::from_secs(ttl_minutes.saturating_mul(60).min(MAX_TTL_SECS));
        entries.insert(key.to_string(), Entry { value, expires_at });
        debug!(key, ttl_minutes, "Cached entry");
        Ok(())
    }

    async fn forget(&self, key: &str) -> DomainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
