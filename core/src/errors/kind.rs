//! Error kinds reported to callers of the issuance surface
//!
//! The integer values are part of the wire contract and must never change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a verification code request, as seen by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ErrorKind {
    /// Code generated, stored (when applicable) and delivered
    Success = 0,
    /// Store write failed; no code was durably recorded
    StoreError = 1,
    /// Store write succeeded or was skipped, but delivery failed
    DeliveryError = 2,
    /// Unexpected internal fault; state undefined
    Exception = 3,
    /// Malformed request, rejected before issuance
    InvalidArgument = 4,
}

impl ErrorKind {
    /// Stable integer value sent on the wire
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ErrorKind::Success
    }
}

impl From<ErrorKind> for i32 {
    fn from(kind: ErrorKind) -> Self {
        kind.code()
    }
}

impl TryFrom<i32> for ErrorKind {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorKind::Success),
            1 => Ok(ErrorKind::StoreError),
            2 => Ok(ErrorKind::DeliveryError),
            3 => Ok(ErrorKind::Exception),
            4 => Ok(ErrorKind::InvalidArgument),
            other => Err(format!("Unknown error kind: {}", other)),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Success => "Success",
            ErrorKind::StoreError => "StoreError",
            ErrorKind::DeliveryError => "DeliveryError",
            ErrorKind::Exception => "Exception",
            ErrorKind::InvalidArgument => "InvalidArgument",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_values() {
        assert_eq!(ErrorKind::Success.code(), 0);
        assert_eq!(ErrorKind::StoreError.code(), 1);
        assert_eq!(ErrorKind::DeliveryError.code(), 2);
        assert_eq!(ErrorKind::Exception.code(), 3);
        assert_eq!(ErrorKind::InvalidArgument.code(), 4);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ErrorKind::DeliveryError).unwrap(), "2");
        let kind: ErrorKind = serde_json::from_str("1").unwrap();
        assert_eq!(kind, ErrorKind::StoreError);
        assert!(serde_json::from_str::<ErrorKind>("9").is_err());
    }
}
