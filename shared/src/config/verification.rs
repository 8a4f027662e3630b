//! Verification code issuance configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key prefix for stored verification codes.
///
/// Must stay stable for the lifetime of a deployment: changing it orphans
/// every code issued under the previous prefix.
pub const DEFAULT_CODE_PREFIX: &str = "verify_code_";

/// Default time-to-live for a stored code (10 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: i64 = 600;

/// Longest accepted code lifetime (30 days)
pub const MAX_CODE_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Which deployment of the issuance service is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceVariant {
    /// Issue and deliver a code, echo it to the caller, store nothing
    GenerationOnly,
    /// Issue, store with TTL and deliver a code; supports later validation
    Validating,
}

impl ServiceVariant {
    /// Whether this variant needs a code store
    pub fn requires_store(&self) -> bool {
        matches!(self, ServiceVariant::Validating)
    }
}

impl Default for ServiceVariant {
    fn default() -> Self {
        ServiceVariant::Validating
    }
}

impl fmt::Display for ServiceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceVariant::GenerationOnly => write!(f, "generation_only"),
            ServiceVariant::Validating => write!(f, "validating"),
        }
    }
}

impl FromStr for ServiceVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generation_only" | "generation-only" | "captcha" => Ok(ServiceVariant::GenerationOnly),
            "validating" | "verify" => Ok(ServiceVariant::Validating),
            _ => Err(format!("Invalid service variant: {}", s)),
        }
    }
}

/// Verification code issuance settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Deployed variant
    pub variant: ServiceVariant,

    /// Prefix prepended to the identity to build the store key
    pub code_prefix: String,

    /// Seconds a stored code stays valid
    pub code_ttl_seconds: i64,

    /// Product name shown in the message body
    pub product_name: String,

    /// Message subject line
    pub subject: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            variant: ServiceVariant::default(),
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            product_name: String::from("VeriMail"),
            subject: String::from("Your verification code"),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            variant: std::env::var("VERIFY_VARIANT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.variant),
            code_prefix: std::env::var("VERIFY_CODE_PREFIX").unwrap_or(defaults.code_prefix),
            code_ttl_seconds: std::env::var("VERIFY_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_seconds),
            product_name: std::env::var("VERIFY_PRODUCT_NAME").unwrap_or(defaults.product_name),
            subject: std::env::var("VERIFY_SUBJECT").unwrap_or(defaults.subject),
        }
    }

    /// Reject settings the store cannot honour
    ///
    /// `code_ttl_seconds <= 0` is allowed and means no expiry.
    pub fn validate(&self) -> Result<(), String> {
        if self.code_ttl_seconds > MAX_CODE_TTL_SECONDS {
            return Err(format!(
                "code_ttl_seconds {} exceeds the maximum of {}",
                self.code_ttl_seconds, MAX_CODE_TTL_SECONDS
            ));
        }
        Ok(())
    }

    /// Settings for a generation-only deployment
    pub fn generation_only() -> Self {
        Self {
            variant: ServiceVariant::GenerationOnly,
            ..Default::default()
        }
    }
}
