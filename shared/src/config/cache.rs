//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Maximum number of retry attempts for a cache operation
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubled per attempt)
    pub retry_delay_ms: u64,

    /// Use the in-memory store instead of Redis
    pub use_memory: bool,

    /// In-memory store configuration
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            max_retries: 3,
            retry_delay_ms: 100,
            use_memory: false,
            memory: MemoryCacheConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let use_memory = std::env::var("CACHE_BACKEND")
            .map(|backend| backend.eq_ignore_ascii_case("memory"))
            .unwrap_or(false);

        Self {
            url,
            use_memory,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Override the retry policy
    pub fn with_retries(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }
}

/// In-memory cache configuration (for development/testing)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MemoryCacheConfig {
    /// Cleanup interval in seconds (0 disables the background sweeper)
    pub cleanup_interval: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

fn default_cleanup_interval() -> u64 {
    60  // 1 minute
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.max_retries, 3);
        assert!(!config.use_memory);
    }

    #[test]
    fn test_cache_config_with_retries() {
        let config = CacheConfig::new("redis://cache:6379").with_retries(5, 50);

        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay_ms, 50);
    }

    #[test]
    fn test_memory_cache_config() {
        let config = MemoryCacheConfig::default();
        assert_eq!(config.cleanup_interval, 60);
    }
}
