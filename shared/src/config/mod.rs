//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis and in-memory code store configuration
//! - `email` - Outbound email (SMTP) configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `verification` - Verification code issuance settings

pub mod cache;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, MemoryCacheConfig};
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::{ServiceVariant, VerificationConfig};

/// Prefix for environment variable overrides consumed by [`AppConfig::load`]
pub const ENV_OVERRIDE_PREFIX: &str = "APP";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Cache configuration (validating deployments only)
    #[serde(default)]
    pub cache: CacheConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            verification: VerificationConfig::from_env(),
            logging,
        }
    }

    /// Load configuration from layered sources
    ///
    /// Sources, lowest priority first:
    /// 1. `.env` file (if present) and plain environment variables, via [`AppConfig::from_env`]
    /// 2. `config/<environment>.toml` (optional)
    /// 3. `APP__<SECTION>__<FIELD>` environment overrides
    pub fn load() -> Result<Self, ::config::ConfigError> {
        dotenvy::dotenv().ok();

        let base = Self::from_env();
        let file = format!("config/{}", base.environment.config_file());

        let mut config: Self = ::config::Config::builder()
            .add_source(::config::Config::try_from(&base)?)
            .add_source(::config::File::with_name(&file).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_OVERRIDE_PREFIX)
                    .try_parsing(true)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        // The SMTP password is never serialized, so it does not survive the merge
        if config.email.password.is_empty() {
            config.email.password = base.email.password;
        }

        config
            .verification
            .validate()
            .map_err(::config::ConfigError::Message)?;

        Ok(config)
    }

    /// Whether the deployment needs a code store
    pub fn requires_store(&self) -> bool {
        self.verification.variant.requires_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.verification.code_prefix, "verify_code_");
        assert_eq!(config.verification.code_ttl_seconds, 600);
        assert_eq!(config.verification.variant, ServiceVariant::Validating);
        assert!(config.requires_store());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{ "verification": { "variant": "generation_only" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.verification.variant, ServiceVariant::GenerationOnly);
        assert_eq!(config.verification.code_ttl_seconds, 600);
        assert_eq!(config.server.port, 8080);
        assert!(!config.requires_store());
    }
}
