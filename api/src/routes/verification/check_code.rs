use actix_web::{web, HttpResponse};
use validator::Validate;

use vm_core::errors::ErrorKind;
use vm_shared::mask_email;

use crate::dto::{CheckCodeRequest, CheckCodeResponse};
use crate::routes::AppState;

/// Handler for POST /api/v1/verify-code/check
///
/// Checks a submitted code against the stored one. A matching code is
/// consumed, so the same code is valid only once.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "code": "482913" }
/// ```
///
/// # Response
///
/// ```json
/// { "email": "user@example.com", "error": 0, "valid": true }
/// ```
pub async fn check_code(
    state: web::Data<AppState>,
    request: web::Json<CheckCodeRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(
            email = %mask_email(&request.email),
            errors = %errors,
            "Rejected check request"
        );
        return HttpResponse::BadRequest()
            .json(CheckCodeResponse::failure(request.email, ErrorKind::InvalidArgument));
    }

    match state
        .verification_service
        .check_code(&request.email, &request.code)
        .await
    {
        Ok(check) => HttpResponse::Ok().json(CheckCodeResponse::from_check(request.email, check)),
        Err(error) => {
            tracing::error!(
                email = %mask_email(&request.email),
                error = %error,
                "Code check failed"
            );
            HttpResponse::Ok().json(CheckCodeResponse::failure(request.email, error.kind()))
        }
    }
}
