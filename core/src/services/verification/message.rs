//! Rendering of verification codes into outbound messages

use crate::domain::entities::verification_code::VerificationCode;

use super::types::OutboundMessage;

/// Template used to render verification messages
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    /// Sender mailbox
    pub from: String,
    pub subject: String,
    /// Product name shown in the body
    pub product_name: String,
    /// Validity window announced to the recipient
    pub ttl_seconds: i64,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            from: "VeriMail <no-reply@localhost>".to_string(),
            subject: "Your verification code".to_string(),
            product_name: "VeriMail".to_string(),
            ttl_seconds: 600,
        }
    }
}

impl MessageTemplate {
    /// Validity window in whole minutes, rounded up
    ///
    /// `None` when `ttl_seconds <= 0`, i.e. the code never expires.
    pub fn validity_minutes(&self) -> Option<i64> {
        (self.ttl_seconds > 0).then(|| self.ttl_seconds.saturating_add(59) / 60)
    }

    fn validity_sentence(&self) -> String {
        match self.validity_minutes() {
            Some(1) => "It is valid for 1 minute.".to_string(),
            Some(minutes) => format!("It is valid for {} minutes.", minutes),
            None => "It does not expire until used.".to_string(),
        }
    }
}

/// Render the message that delivers `code` to `identity`
pub fn render_verification_message(
    template: &MessageTemplate,
    identity: &str,
    code: &VerificationCode,
) -> OutboundMessage {
    let validity = template.validity_sentence();

    OutboundMessage {
        to: identity.to_string(),
        from: template.from.clone(),
        subject: template.subject.clone(),
        text_body: format!(
            "Your {} verification code is {}. {}",
            template.product_name, code, validity
        ),
        html_body: Some(format!(
            "<p>Your {} verification code is <strong>{}</strong>. {}</p>",
            template.product_name, code, validity
        )),
    }
}
