//! Traits for code store and delivery channel integration
//!
//! Both traits are capability boundaries: implementations must absorb every
//! transport error and report it through the return value. Nothing behind
//! these traits is allowed to fail the issuance flow by returning `Err` or
//! panicking.

use async_trait::async_trait;

use super::types::{DeliveryStatus, OutboundMessage};

/// Key-value store with per-key expiry holding unconsumed codes
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store `value` under `key`, replacing any existing value
    ///
    /// The record expires `ttl_seconds` from now; `ttl_seconds <= 0` stores
    /// it without expiry. Returns `false` if nothing was durably stored.
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> bool;

    /// Get the stored value; `None` both for never-set and expired keys
    async fn get(&self, key: &str) -> Option<String>;

    /// Check whether a live record exists without reading it
    async fn exists(&self, key: &str) -> bool;

    /// Remove a record; `true` only if this call removed it
    async fn delete(&self, key: &str) -> bool;

    /// Remove a record only if it still holds `expected`
    ///
    /// The comparison and the removal happen as one step on the backend, so
    /// a record overwritten in between is left in place. Returns `true` only
    /// if this call removed a live record holding `expected`.
    async fn consume(&self, key: &str, expected: &str) -> bool;
}

/// Outbound message transport used to convey a code to its subject
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Make exactly one delivery attempt
    async fn send(&self, message: &OutboundMessage) -> DeliveryStatus;

    /// Get the delivery provider name (e.g., "SMTP", "Mock")
    fn provider_name(&self) -> &str;
}
