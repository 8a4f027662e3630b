//! Domain entities representing core business objects.

pub mod verification_code;

// Re-export commonly used types
pub use verification_code::{VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
