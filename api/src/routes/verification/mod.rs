//! Verification code route handlers
//!
//! - `captcha`: issue a code and return it (generation-only deployment)
//! - `verify_code`: issue and store a code (validating deployment)
//! - `check_code`: check and consume a stored code (validating deployment)

pub mod captcha;
pub mod check_code;
pub mod verify_code;

pub use captcha::captcha;
pub use check_code::check_code;
pub use verify_code::verify_code;
