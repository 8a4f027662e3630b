//! Email delivery configuration module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Email provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Real SMTP relay
    Smtp,
    /// Logs messages instead of sending them
    Mock,
}

impl Default for EmailProvider {
    fn default() -> Self {
        EmailProvider::Mock
    }
}

impl fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailProvider::Smtp => write!(f, "smtp"),
            EmailProvider::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Which delivery implementation to use
    pub provider: EmailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    #[serde(skip_serializing)]
    pub password: String,

    /// Sender address
    pub from_email: String,

    /// Sender display name
    pub from_name: String,

    /// Use STARTTLS instead of implicit TLS
    pub starttls: bool,

    /// Per-send timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            smtp_host: String::from("localhost"),
            smtp_port: 465,
            username: String::new(),
            password: String::new(),
            from_email: String::from("no-reply@localhost"),
            from_name: String::from("VeriMail"),
            starttls: false,
            timeout_secs: 30,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.password),
            from_email: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_email),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.starttls),
            timeout_secs: defaults.timeout_secs,
        }
    }

    /// Formatted `Name <address>` sender mailbox
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("SMTP".parse::<EmailProvider>().unwrap(), EmailProvider::Smtp);
        assert_eq!("mock".parse::<EmailProvider>().unwrap(), EmailProvider::Mock);
        assert!("sms".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_sender_format() {
        let config = EmailConfig {
            from_email: "noreply@example.com".to_string(),
            from_name: "Example".to_string(),
            ..Default::default()
        };
        assert_eq!(config.sender(), "Example <noreply@example.com>");
    }

    #[test]
    fn test_password_not_serialized() {
        let config = EmailConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
