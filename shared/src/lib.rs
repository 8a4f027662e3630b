//! Shared utilities and common types for the VeriMail services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (email masking for logs)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    CacheConfig, MemoryCacheConfig, EmailConfig, EmailProvider,
    ServerConfig, LoggingConfig, LogFormat,
    VerificationConfig, ServiceVariant,
};
pub use utils::email::mask_email;
