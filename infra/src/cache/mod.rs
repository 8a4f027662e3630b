//! Cache module: code store implementations
//!
//! Provides the Redis-backed store used in production and an in-memory
//! store for development and tests, plus a factory choosing between them.

pub mod memory_store;
pub mod redis_client;
pub mod redis_code_store;


use std::sync::Arc;
use std::time::Duration;

use vm_core::services::verification::CodeStore;
use vm_shared::config::CacheConfig;

use crate::InfrastructureError;

pub use memory_store::MemoryCodeStore;
pub use redis_client::RedisClient;
pub use redis_code_store::RedisCodeStore;

/// Create a code store based on configuration
///
/// With `use_memory` set, returns a [`MemoryCodeStore`] (and starts its
/// sweeper when `memory.cleanup_interval > 0`). Otherwise connects to Redis;
/// a connection failure is returned to the caller rather than silently
/// swapped for a process-local store.
///
/// Must be called from within a tokio runtime.
pub async fn create_code_store(config: &CacheConfig) -> Result<Arc<dyn CodeStore>, InfrastructureError> {
    if config.use_memory {
        tracing::warn!("Using in-memory code store; codes are lost on restart and not shared between instances");
        let store = Arc::new(MemoryCodeStore::new());
        if config.memory.cleanup_interval > 0 {
            store.spawn_sweeper(Duration::from_secs(config.memory.cleanup_interval));
        }
        return Ok(store);
    }

    let client = RedisClient::new(config).await?;
    Ok(Arc::new(RedisCodeStore::new(client)))
}
