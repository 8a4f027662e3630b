//! Email Delivery Module
//!
//! Delivery channel implementations for sending verification codes by email:
//!
//! - **SMTP**: production delivery through an SMTP relay (lettre)
//! - **Mock**: console output for development and tests

use std::sync::Arc;

use vm_core::services::verification::DeliveryChannel;
use vm_shared::config::{EmailConfig, EmailProvider};

pub mod mock_email;
pub mod smtp;

pub use mock_email::MockEmailChannel;
pub use smtp::SmtpEmailChannel;

/// Create a delivery channel based on configuration
///
/// Falls back to the mock channel when the SMTP transport cannot be built,
/// so a misconfigured development setup still starts.
pub fn create_delivery_channel(config: &EmailConfig) -> Arc<dyn DeliveryChannel> {
    match config.provider {
        EmailProvider::Mock => Arc::new(MockEmailChannel::new()),
        EmailProvider::Smtp => match SmtpEmailChannel::new(config) {
            Ok(channel) => Arc::new(channel),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP email channel: {}", e);
                tracing::warn!("Falling back to mock email channel");
                Arc::new(MockEmailChannel::new())
            }
        },
    }
}
