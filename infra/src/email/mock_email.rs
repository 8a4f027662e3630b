//! Mock email channel
//!
//! Logs messages (and optionally prints them to the console) instead of
//! sending them. Used for development and as the fallback when SMTP cannot
//! be configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use vm_core::services::verification::{DeliveryChannel, DeliveryStatus, OutboundMessage};
use vm_shared::mask_email;

/// Mock delivery channel for development and testing
///
/// - Prints messages to the console when enabled
/// - Generates mock message IDs
/// - Counts messages and keeps the last one per recipient
#[derive(Debug)]
pub struct MockEmailChannel {
    message_count: AtomicU64,
    simulate_failure: AtomicBool,
    console_output: bool,
    last_messages: Mutex<HashMap<String, OutboundMessage>>,
}

impl MockEmailChannel {
    /// Create a mock channel that prints to the console
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock channel with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: AtomicU64::new(0),
            simulate_failure: AtomicBool::new(simulate_failure),
            console_output,
            last_messages: Mutex::new(HashMap::new()),
        }
    }

    /// Total number of messages accepted
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Last message accepted for a recipient
    pub fn last_message_for(&self, to: &str) -> Option<OutboundMessage> {
        self.last_messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(to)
            .cloned()
    }
}

impl Default for MockEmailChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryChannel for MockEmailChannel {
    async fn send(&self, message: &OutboundMessage) -> DeliveryStatus {
        let masked = mask_email(&message.to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %masked, "Mock email channel simulating failure");
            return DeliveryStatus::Failed {
                reason: "Simulated email delivery failure".to_string(),
            };
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL CHANNEL - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("From: {}", message.from);
            println!("To: {}", message.to);
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("{}", message.text_body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_channel",
            provider = "mock",
            to = %masked,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );

        self.last_messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(message.to.clone(), message.clone());

        DeliveryStatus::Sent { message_id }
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str, body: &str) -> OutboundMessage {
        OutboundMessage {
            to: to.to_string(),
            from: "VeriMail <no-reply@localhost>".to_string(),
            subject: "Your verification code".to_string(),
            text_body: body.to_string(),
            html_body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_send_success() {
        let channel = MockEmailChannel::with_options(false, false);
        let status = channel.send(&message("a@x.com", "code 123456")).await;

        match status {
            DeliveryStatus::Sent { message_id } => assert!(message_id.starts_with("mock_")),
            other => panic!("expected Sent, got {:?}", other),
        }
        assert_eq!(channel.get_message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_simulate_failure() {
        let channel = MockEmailChannel::with_options(false, true);
        let status = channel.send(&message("a@x.com", "code")).await;

        assert!(!status.is_sent());
        assert_eq!(channel.get_message_count(), 0);
        assert!(channel.last_message_for("a@x.com").is_none());

        channel.set_simulate_failure(false);
        assert!(channel.send(&message("a@x.com", "code")).await.is_sent());
    }

    #[tokio::test]
    async fn test_mock_keeps_last_message_per_recipient() {
        let channel = MockEmailChannel::with_options(false, false);
        channel.send(&message("a@x.com", "first")).await;
        channel.send(&message("b@x.com", "other")).await;
        channel.send(&message("a@x.com", "second")).await;

        assert_eq!(channel.last_message_for("a@x.com").unwrap().text_body, "second");
        assert_eq!(channel.last_message_for("b@x.com").unwrap().text_body, "other");
        assert_eq!(channel.get_message_count(), 3);

        channel.reset_counter();
        assert_eq!(channel.get_message_count(), 0);
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(MockEmailChannel::new().provider_name(), "Mock");
    }
}
