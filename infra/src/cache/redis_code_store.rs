//! Redis-backed code store

use async_trait::async_trait;
use tracing::warn;

use vm_core::services::verification::CodeStore;

use super::redis_client::RedisClient;

/// [`CodeStore`] backed by Redis
///
/// Records expire server-side through `SETEX` and are consumed with a Lua
/// compare-and-delete. A non-positive TTL stores the
/// record without expiry. Every Redis failure is already retried by the
/// client; what is left is logged here and reported as `false` / `None`.
#[derive(Clone)]
pub struct RedisCodeStore {
    redis_client: RedisClient,
}

impl RedisCodeStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Underlying client, e.g. for health checks
    pub fn client(&self) -> &RedisClient {
        &self.redis_client
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> bool {
        let result = if ttl_seconds > 0 {
            self.redis_client
                .set_with_expiry(key, value, ttl_seconds as u64)
                .await
        } else {
            self.redis_client.set(key, value).await
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, event = "code_store_write_failed", "Redis write failed");
                false
            }
        }
    }

    async fn get(&self, key: &str) -> Option<String> {
        match self.redis_client.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, event = "code_store_read_failed", "Redis read failed");
                None
            }
        }
    }

    async fn exists(&self, key: &str) -> bool {
        match self.redis_client.exists(key).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(error = %e, event = "code_store_read_failed", "Redis exists check failed");
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        match self.redis_client.delete(key).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(error = %e, event = "code_store_delete_failed", "Redis delete failed");
                false
            }
        }
    }

    async fn consume(&self, key: &str, expected: &str) -> bool {
        match self.redis_client.delete_if_equals(key, expected).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(error = %e, event = "code_store_delete_failed", "Redis compare-and-delete failed");
                false
            }
        }
    }
}
