//! SMTP email channel

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use vm_core::services::verification::{DeliveryChannel, DeliveryStatus, OutboundMessage};
use vm_shared::config::EmailConfig;
use vm_shared::mask_email;

use crate::InfrastructureError;

/// Delivery channel sending mail through an SMTP relay
///
/// Uses implicit TLS by default (port 465) and STARTTLS when configured.
/// lettre's transport is blocking, so each send runs on tokio's blocking
/// pool. One call is one attempt; nothing is retried here.
#[derive(Clone)]
pub struct SmtpEmailChannel {
    transport: SmtpTransport,
    host: String,
}

impl SmtpEmailChannel {
    /// Build the transport from configuration
    ///
    /// No connection is made until the first send.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.starttls {
            SmtpTransport::starttls_relay(&config.smtp_host)
        } else {
            SmtpTransport::relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?
        .port(config.smtp_port)
        .timeout(Some(Duration::from_secs(config.timeout_secs)));

        let builder = if config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.starttls,
            "SMTP email channel configured"
        );

        Ok(Self {
            transport: builder.build(),
            host: config.smtp_host.clone(),
        })
    }

    /// Build a MIME message: plain text, or text and HTML alternatives
    pub(crate) fn build_message(
        message: &OutboundMessage,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid from address: {}", e)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid to address: {}", e)))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .message_id(Some(format!("<{}@verimail>", message_id)));

        let built = match &message.html_body {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                html.clone(),
            )),
            None => builder.singlepart(SinglePart::plain(message.text_body.clone())),
        };

        built.map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }

    async fn deliver(&self, message: Message) -> Result<(), InfrastructureError> {
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| InfrastructureError::General(format!("Task join error: {}", e)))?
            .map_err(|e| InfrastructureError::Email(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl DeliveryChannel for SmtpEmailChannel {
    async fn send(&self, message: &OutboundMessage) -> DeliveryStatus {
        let masked = mask_email(&message.to);
        let message_id = Uuid::new_v4().to_string();

        debug!(to = %masked, host = %self.host, "Sending email");

        let result = match Self::build_message(message, &message_id) {
            Ok(mime) => self.deliver(mime).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(
                    target: "email_channel",
                    provider = "smtp",
                    to = %masked,
                    message_id = %message_id,
                    "Email sent successfully"
                );
                DeliveryStatus::Sent { message_id }
            }
            Err(e) => {
                warn!(
                    target: "email_channel",
                    provider = "smtp",
                    to = %masked,
                    error = %e,
                    "Email delivery failed"
                );
                DeliveryStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
