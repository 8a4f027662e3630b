use serde::{Deserialize, Serialize};
use validator::Validate;

use vm_core::errors::ErrorKind;
use vm_core::services::verification::{CodeCheck, IssuanceResult};

/// Longest address accepted (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: u64 = 254;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CaptchaRequest {
    /// Address to send the code to
    #[validate(length(min = 1, max = "MAX_EMAIL_LENGTH"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaResponse {
    pub email: String,
    pub error: ErrorKind,
    /// The issued code, only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

impl From<IssuanceResult> for CaptchaResponse {
    fn from(result: IssuanceResult) -> Self {
        Self {
            email: result.identity,
            error: result.error,
            captcha: result.code.map(|code| code.as_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Address to send the code to
    #[validate(length(min = 1, max = "MAX_EMAIL_LENGTH"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub email: String,
    pub error: ErrorKind,
}

impl From<IssuanceResult> for VerifyCodeResponse {
    fn from(result: IssuanceResult) -> Self {
        Self {
            email: result.identity,
            error: result.error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckCodeRequest {
    #[validate(length(min = 1, max = "MAX_EMAIL_LENGTH"))]
    pub email: String,

    /// Code as received by the user
    #[validate(length(min = 1, max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckCodeResponse {
    pub email: String,
    pub error: ErrorKind,
    pub valid: bool,
}

impl CheckCodeResponse {
    pub fn from_check(email: String, check: CodeCheck) -> Self {
        Self {
            email,
            error: ErrorKind::Success,
            valid: check.is_accepted(),
        }
    }

    pub fn failure(email: String, error: ErrorKind) -> Self {
        Self {
            email,
            error,
            valid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        assert!(CaptchaRequest { email: "a@x.com".to_string() }.validate().is_ok());
        assert!(CaptchaRequest { email: String::new() }.validate().is_err());

        let oversized = "a".repeat(MAX_EMAIL_LENGTH as usize + 1);
        assert!(VerifyCodeRequest { email: oversized }.validate().is_err());

        let check = CheckCodeRequest {
            email: "a@x.com".to_string(),
            code: String::new(),
        };
        assert!(check.validate().is_err());
    }

    #[test]
    fn test_captcha_response_omits_missing_code() {
        let response = CaptchaResponse {
            email: "a@x.com".to_string(),
            error: ErrorKind::DeliveryError,
            captcha: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "a@x.com", "error": 2 }));
    }
}
