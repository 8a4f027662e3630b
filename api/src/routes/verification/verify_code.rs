use actix_web::{web, HttpResponse};
use validator::Validate;

use vm_core::errors::ErrorKind;
use vm_shared::mask_email;

use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::routes::AppState;

/// Handler for POST /api/v1/verify-code
///
/// Issues a code, stores it with its TTL and emails it. The code itself is
/// never part of the response.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "email": "user@example.com", "error": 0 }
/// ```
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(
            email = %mask_email(&request.email),
            errors = %errors,
            "Rejected verify-code request"
        );
        return HttpResponse::BadRequest().json(VerifyCodeResponse {
            email: request.email,
            error: ErrorKind::InvalidArgument,
        });
    }

    let result = state.verification_service.issue(&request.email).await;
    HttpResponse::Ok().json(VerifyCodeResponse::from(result))
}
