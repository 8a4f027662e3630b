//! Verification code entity for email-based verification.

use rand::{rngs::OsRng, Rng};
use serde::{Serialize, Serializer};
use std::fmt;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// A 6-digit one-time verification code
///
/// The value is always within `[CODE_MIN, CODE_MAX]`, so the decimal form
/// never has a leading zero. Codes are only produced by
/// [`VerificationCode::generate`]; there is deliberately no way to build one
/// from arbitrary input. Submitted codes are compared as strings against the
/// stored value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerificationCode(u32);

impl VerificationCode {
    /// Generates a fresh code drawn uniformly from `[CODE_MIN, CODE_MAX]`
    ///
    /// Uses `OsRng` (OS-provided CSPRNG). `gen_range` rejects biased samples,
    /// so every one of the 900,000 values is equally likely.
    pub fn generate() -> Self {
        Self(OsRng.gen_range(CODE_MIN..=CODE_MAX))
    }

    /// Numeric value of the code
    pub fn value(&self) -> u32 {
        self.0
    }

    /// String form used at every storage and wire boundary
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for VerificationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
