use actix_web::{web, HttpResponse};
use validator::Validate;

use vm_core::errors::ErrorKind;
use vm_shared::mask_email;

use crate::dto::{CaptchaRequest, CaptchaResponse};
use crate::routes::AppState;

/// Handler for POST /api/v1/captcha
///
/// Issues a code, emails it and returns it to the caller. Nothing is stored.
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
/// { "email": "user@example.com", "error": 0, "captcha": "482913" }
/// ```
///
/// `captcha` is omitted unless `error` is 0. Issuance failures are still
/// reported with 200 OK; only invalid requests get 400.
pub async fn captcha(
    state: web::Data<AppState>,
    request: web::Json<CaptchaRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(
            email = %mask_email(&request.email),
            errors = %errors,
            "Rejected captcha request"
        );
        return HttpResponse::BadRequest().json(CaptchaResponse {
            email: request.email,
            error: ErrorKind::InvalidArgument,
            captcha: None,
        });
    }

    let result = state.verification_service.issue(&request.email).await;
    HttpResponse::Ok().json(CaptchaResponse::from(result))
}
