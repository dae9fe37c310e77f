//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Which cache implementation backs the revocation ledger and user cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map, single node only
    Memory,
    /// Shared Redis instance
    Redis,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Backend selection
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,

    /// Redis connection URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Maximum number of retry attempts per Redis operation
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubled per attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Prefix prepended to every cache key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_url(),
            connection_timeout: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let backend = std::env::var("CACHE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_backend);
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| default_url());
        let key_prefix = match std::env::var("CACHE_KEY_PREFIX") {
            Ok(p) if p.is_empty() => None,
            Ok(p) => Some(p),
            Err(_) => default_key_prefix(),
        };

        Self {
            backend,
            url,
            key_prefix,
            ..Default::default()
        }
    }

    /// Create a Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Remove the key prefix
    pub fn without_prefix(mut self) -> Self {
        self.key_prefix = None;
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_backend() -> CacheBackend {
    CacheBackend::Memory
}

fn default_url() -> String {
    String::from("redis://localhost:6379")
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_key_prefix() -> Option<String> {
    Some(String::from("jwt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_with_default_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("users:42"), "jwt:users:42");
    }

    #[test]
    fn test_make_key_without_prefix() {
        let config = CacheConfig::default().without_prefix();
        assert_eq!(config.make_key("logout:42"), "logout:42");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("redis".parse::<CacheBackend>().unwrap(), CacheBackend::Redis);
        assert_eq!("Memory".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
        assert!("memcached".parse::<CacheBackend>().is_err());
    }
}
