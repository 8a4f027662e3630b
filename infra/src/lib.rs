//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `vm_core`:
//!
//! - **Cache**: Redis-backed and in-memory [`CodeStore`](vm_core::CodeStore)
//!   implementations with TTL support
//! - **Email**: SMTP delivery through lettre and a console mock for development
//!
//! Adapters never return errors to the verification service. Failures are
//! logged here and reported as `false`, `None` or `DeliveryStatus::Failed`.

/// Cache module - Redis client and code stores
pub mod cache;

/// Email module - Delivery channel implementations
pub mod email;

pub use cache::{create_code_store, MemoryCodeStore, RedisClient, RedisCodeStore};
pub use email::{create_delivery_channel, MockEmailChannel, SmtpEmailChannel};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email transport or message construction error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
