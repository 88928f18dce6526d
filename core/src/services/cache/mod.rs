//! Read-through entity cache.
//!
//! Services check the cache first, load from the repository on a miss and
//! populate the entry; every successful write removes the affected keys.
//! A failing cache is logged and behaves like an empty one.

mod keys;
mod memory;

pub use keys::*;
pub use memory::MemoryCache;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Key/value store with per-entry TTL
#[async_trait]
pub trait EntityCache: Send + Sync {
    /// Fetch a value; `Ok(None)` on miss or expiry
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Store a value for `ttl_seconds`
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), String>;

    /// Remove one key
    async fn remove(&self, key: &str) -> Result<(), String>;

    /// Remove every key starting with `prefix`
    async fn remove_prefix(&self, prefix: &str) -> Result<(), String>;
}

/// Service-side handle to an [`EntityCache`] with JSON helpers.
///
/// Never surfaces cache errors: they are logged and reads fall through to
/// the repository.
#[derive(Clone)]
pub struct ServiceCache {
    inner: Arc<dyn EntityCache>,
    ttl_seconds: u64,
}

impl ServiceCache {
    pub fn new(inner: Arc<dyn EntityCache>, ttl_seconds: u64) -> Self {
        Self { inner, ttl_seconds }
    }

    /// In-process cache, for tests and the memory backend
    pub fn in_memory(ttl_seconds: u64) -> Self {
        Self::new(Arc::new(MemoryCache::new()), ttl_seconds)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.inner.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::debug!(key = key, "cache hit");
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!(key = key, error = %e, "Discarding undecodable cache entry");
                    let _ = self.inner.remove(key).await;
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Cache read failed");
                None
            }
        }
    }

    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Failed to encode cache entry");
                return;
            }
        };
        if let Err(e) = self.inner.set(key, raw, self.ttl_seconds).await {
            tracing::warn!(key = key, error = %e, "Cache write failed");
        }
    }

    /// Remove each key, logging failures
    pub async fn invalidate(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.inner.remove(key).await {
                tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
            }
        }
    }

    pub async fn invalidate_prefix(&self, prefix: &str) {
        if let Err(e) = self.inner.remove_prefix(prefix).await {
            tracing::warn!(prefix = prefix, error = %e, "Cache prefix invalidation failed");
        }
    }
}
