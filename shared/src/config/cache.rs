//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Which entity cache implementation the services use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local map with TTL expiry
    #[default]
    Memory,
    /// Shared Redis instance
    Redis,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Entity cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache implementation
    pub backend: CacheBackend,

    /// Redis connection URL (redis backend only)
    pub url: String,

    /// Default TTL for cache entries in seconds
    pub default_ttl: u64,

    /// Prefix applied to every key
    pub key_prefix: Option<String>,

    /// Seconds between sweeps of expired entries from the in-process
    /// cache and passcode store; 0 disables the sweep
    pub sweep_interval: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            url: String::from("redis://localhost:6379"),
            default_ttl: 300,
            key_prefix: Some(String::from("stayhub")),
            sweep_interval: 60,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: std::env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url.clone()),
            default_ttl: std::env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            sweep_interval: std::env::var("CACHE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            ..defaults
        }
    }

    /// Create a new cache configuration with a Redis URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_with_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("hotels:1"), "stayhub:hotels:1");

        let bare = CacheConfig {
            key_prefix: None,
            ..Default::default()
        };
        assert_eq!(bare.make_key("hotels:1"), "hotels:1");
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("redis".parse::<CacheBackend>().unwrap(), CacheBackend::Redis);
        assert!("memcached".parse::<CacheBackend>().is_err());
    }
}
