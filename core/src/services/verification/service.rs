//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use vm_shared::config::verification::ServiceVariant;
use vm_shared::mask_email;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult, ErrorKind};

use super::config::VerificationServiceConfig;
use super::message::render_verification_message;
use super::traits::{CodeStore, DeliveryChannel};
use super::types::{CodeCheck, DeliveryStatus, IssuanceResult};

/// Verification service issuing email verification codes
///
/// One service covers both deployments. Without a store it issues a code,
/// delivers it and hands it back to the caller. With a store it records the
/// code under `code_prefix + identity` before delivery, never returns it,
/// and can later check a submitted code against the record.
///
/// The service holds no per-request state; everything shared lives in the
/// store.
pub struct VerificationService {
    /// Delivery channel for outbound messages
    delivery: Arc<dyn DeliveryChannel>,
    /// Code store, absent in generation-only deployments
    store: Option<Arc<dyn CodeStore>>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a service that issues codes without storing them
    ///
    /// # Arguments
    ///
    /// * `delivery` - Delivery channel implementation
    /// * `config` - Service configuration
    pub fn generation_only(
        delivery: Arc<dyn DeliveryChannel>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            delivery,
            store: None,
            config,
        }
    }

    /// Create a service that stores codes for later validation
    ///
    /// # Arguments
    ///
    /// * `delivery` - Delivery channel implementation
    /// * `store` - Code store implementation
    /// * `config` - Service configuration
    pub fn with_store(
        delivery: Arc<dyn DeliveryChannel>,
        store: Arc<dyn CodeStore>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            delivery,
            store: Some(store),
            config,
        }
    }

    /// Whether this service stores issued codes
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// The deployment variant this service implements
    pub fn variant(&self) -> ServiceVariant {
        if self.has_store() {
            ServiceVariant::Validating
        } else {
            ServiceVariant::GenerationOnly
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a verification code for an identity
    ///
    /// This method:
    /// 1. Generates a new code
    /// 2. Stores it with the configured TTL, overwriting any previous code (store only)
    /// 3. Delivers it to the identity
    ///
    /// A failed store write stops the flow before anything is sent. A failed
    /// delivery leaves the stored code in place; there is no rollback and no
    /// retry, the caller requests a new code instead.
    ///
    /// Never fails: every outcome, including a panic inside a dependency, is
    /// reported through [`IssuanceResult::error`].
    pub async fn issue(&self, identity: &str) -> IssuanceResult {
        match AssertUnwindSafe(self.run_issuance(identity)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                tracing::error!(
                    identity = %mask_email(identity),
                    reason = %panic_message(panic.as_ref()),
                    event = "otp_issuance_panicked",
                    "Unexpected fault while issuing verification code"
                );
                IssuanceResult::failure(identity, ErrorKind::Exception)
            }
        }
    }

    async fn run_issuance(&self, identity: &str) -> IssuanceResult {
        let code = VerificationCode::generate();

        tracing::info!(
            identity = %mask_email(identity),
            variant = %self.variant(),
            event = "otp_generated",
            "Generated new verification code"
        );

        if let Some(store) = &self.store {
            let key = self.config.key_for(identity);
            let stored = store
                .set(&key, &code.as_string(), self.config.code_ttl_seconds)
                .await;

            if !stored {
                tracing::error!(
                    identity = %mask_email(identity),
                    event = "otp_storage_failed",
                    "Failed to store verification code"
                );
                return IssuanceResult::failure(identity, ErrorKind::StoreError);
            }
        }

        let message = render_verification_message(&self.config.template, identity, &code);

        match self.delivery.send(&message).await {
            DeliveryStatus::Sent { message_id } => {
                tracing::info!(
                    identity = %mask_email(identity),
                    provider = self.delivery.provider_name(),
                    message_id = %message_id,
                    event = "otp_issued",
                    "Verification code delivered"
                );
            }
            DeliveryStatus::Failed { reason } => {
                tracing::error!(
                    identity = %mask_email(identity),
                    provider = self.delivery.provider_name(),
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                return IssuanceResult::failure(identity, ErrorKind::DeliveryError);
            }
        }

        if self.has_store() {
            IssuanceResult::success(identity, None)
        } else {
            IssuanceResult::success(identity, Some(code))
        }
    }

    /// Check a submitted code and consume it on success
    ///
    /// The record is consumed on a match with a compare-and-delete, and the
    /// match only counts if that removed it. A code is therefore accepted at
    /// most once under concurrent checks, and a code overwritten by a newer
    /// issuance after the read is rejected without touching the newer
    /// record. A mismatch leaves the record untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(CodeCheck)` - Outcome of the check
    /// * `Err(DomainError::StoreNotConfigured)` - In generation-only deployments
    pub async fn check_code(&self, identity: &str, submitted: &str) -> DomainResult<CodeCheck> {
        let store = self.store.as_ref().ok_or(DomainError::StoreNotConfigured)?;
        let key = self.config.key_for(identity);

        if !store.exists(&key).await {
            tracing::debug!(
                identity = %mask_email(identity),
                event = "otp_not_found",
                "No live verification code"
            );
            return Ok(CodeCheck::NotFound);
        }

        let stored = match store.get(&key).await {
            Some(stored) => stored,
            None => return Ok(CodeCheck::NotFound),
        };

        if !Self::constant_time_compare(&stored, submitted) {
            tracing::warn!(
                identity = %mask_email(identity),
                event = "otp_verification_failed",
                "Submitted verification code does not match"
            );
            return Ok(CodeCheck::Mismatch);
        }

        if !store.consume(&key, &stored).await {
            // Consumed or replaced between our read and the delete
            tracing::warn!(
                identity = %mask_email(identity),
                event = "otp_already_consumed",
                "Verification code was consumed or replaced concurrently"
            );
            return Ok(CodeCheck::NotFound);
        }

        tracing::info!(
            identity = %mask_email(identity),
            event = "otp_verified_success",
            "Verification code accepted and consumed"
        );
        Ok(CodeCheck::Accepted)
    }

    /// Perform constant-time comparison of two codes
    fn constant_time_compare(code_a: &str, code_b: &str) -> bool {
        if code_a.len() != code_b.len() {
            return false;
        }
        constant_time_eq(code_a.as_bytes(), code_b.as_bytes())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
