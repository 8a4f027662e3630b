//! Verification service module for email-based verification codes
//!
//! This module provides the complete verification code workflow:
//! - Code generation and email delivery
//! - Time-boxed storage of issued codes (validating deployments)
//! - Single-use validation of submitted codes
//! - Mapping of partial failures to a typed result

mod config;
mod message;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use message::{render_verification_message, MessageTemplate};
pub use service::VerificationService;
pub use traits::{CodeStore, DeliveryChannel};
pub use types::{CodeCheck, DeliveryStatus, IssuanceResult, OutboundMessage};
