//! Route handlers
//!
//! - `verification`: code issuance and checking
//! - `health`: liveness probe

pub mod health;
pub mod verification;

use std::sync::Arc;

use vm_core::services::verification::VerificationService;

/// Application state shared by all handlers
pub struct AppState {
    pub verification_service: Arc<VerificationService>,
}

impl AppState {
    pub fn new(verification_service: Arc<VerificationService>) -> Self {
        Self { verification_service }
    }
}
