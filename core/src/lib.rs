//! # VeriMail Core
//!
//! Core business logic and domain layer for the VeriMail services.
//! This crate contains the verification code entity, the issuance and
//! validation service, the store and delivery interfaces it depends on,
//! and the error taxonomy reported to callers.

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use errors::*;
