//! Types for verification service requests and results

use serde::Serialize;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::ErrorKind;

/// Result of one issuance request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuanceResult {
    /// Identity the code was issued for, echoed back unchanged
    pub identity: String,
    /// Outcome of the request
    pub error: ErrorKind,
    /// The issued code; only present on success in generation-only deployments
    pub code: Option<VerificationCode>,
}

impl IssuanceResult {
    pub(crate) fn success(identity: &str, code: Option<VerificationCode>) -> Self {
        Self {
            identity: identity.to_string(),
            error: ErrorKind::Success,
            code,
        }
    }

    pub(crate) fn failure(identity: &str, error: ErrorKind) -> Self {
        Self {
            identity: identity.to_string(),
            error,
            code: None,
        }
    }

    /// Whether the code was issued and delivered
    pub fn is_success(&self) -> bool {
        self.error.is_success()
    }
}

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination address
    pub to: String,
    /// Sender mailbox (`Name <address>` or a bare address)
    pub from: String,
    pub subject: String,
    /// Plain text body
    pub text_body: String,
    /// Optional HTML alternative
    pub html_body: Option<String>,
}

/// Outcome of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Accepted by the transport
    Sent { message_id: String },
    /// Rejected or failed; the reason is for logs only
    Failed { reason: String },
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent { .. })
    }
}

/// Result of checking a submitted code against the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeCheck {
    /// Code matched and has been consumed
    Accepted,
    /// A code is live for the identity but the submitted one differs
    Mismatch,
    /// No live code (never issued, expired, or already consumed)
    NotFound,
}

impl CodeCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CodeCheck::Accepted)
    }
}
