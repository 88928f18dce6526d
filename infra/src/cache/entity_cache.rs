//! Redis-backed entity cache

use async_trait::async_trait;

use hb_core::services::EntityCache;

use super::redis_client::RedisClient;

/// [`EntityCache`] over a shared Redis instance
#[derive(Clone)]
pub struct RedisCache {
    client: RedisClient,
}

impl RedisCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(key, &value, ttl_seconds.max(1))
            .await
            .map_err(|e| e.to_string())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        self.client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<(), String> {
        let removed = self
            .client
            .delete_by_prefix(prefix)
            .await
            .map_err(|e| e.to_string())?;
        tracing::debug!(prefix, removed, "Cleared cache prefix");
        Ok(())
    }
}
