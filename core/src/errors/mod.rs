//! Domain-specific error types and error handling.

mod kind;

pub use kind::ErrorKind;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Code store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("No code store is configured for this deployment")]
    StoreNotConfigured,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// The wire-level error kind reported for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::InvalidArgument,
            DomainError::StoreUnavailable { .. } => ErrorKind::StoreError,
            DomainError::StoreNotConfigured | DomainError::Internal { .. } => ErrorKind::Exception,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_kind() {
        let error = DomainError::Validation { message: "empty email".to_string() };
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert!(error.to_string().contains("empty email"));

        assert_eq!(DomainError::StoreNotConfigured.kind(), ErrorKind::Exception);
        assert_eq!(
            DomainError::StoreUnavailable { message: "timeout".to_string() }.kind(),
            ErrorKind::StoreError
        );
    }
}
