//! Configuration for the verification service

use vm_shared::config::verification::{
    VerificationConfig, DEFAULT_CODE_PREFIX, DEFAULT_CODE_TTL_SECONDS,
};

use super::message::MessageTemplate;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Prefix namespacing code records in a shared store
    pub code_prefix: String,
    /// Seconds a stored code stays valid
    pub code_ttl_seconds: i64,
    /// How issued codes are rendered into messages
    pub template: MessageTemplate,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            template: MessageTemplate::default(),
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the application settings and the sender mailbox
    pub fn from_settings(settings: &VerificationConfig, sender: impl Into<String>) -> Self {
        Self {
            code_prefix: settings.code_prefix.clone(),
            code_ttl_seconds: settings.code_ttl_seconds,
            template: MessageTemplate {
                from: sender.into(),
                subject: settings.subject.clone(),
                product_name: settings.product_name.clone(),
                ttl_seconds: settings.code_ttl_seconds,
            },
        }
    }

    /// Store key for an identity: `code_prefix + identity`
    pub fn key_for(&self, identity: &str) -> String {
        format!("{}{}", self.code_prefix, identity)
    }
}
