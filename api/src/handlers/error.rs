//! Error responses produced outside the route handlers

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};

use vm_core::errors::ErrorKind;

/// Turn a JSON extraction failure into a 400 carrying `InvalidArgument`
///
/// Covers malformed bodies, missing fields, wrong content types and
/// oversized payloads. The address is unknown at this point, so `email` is
/// left empty.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected malformed request body");

    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "email": "",
        "error": ErrorKind::InvalidArgument,
    }));

    InternalError::from_response(err, response).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
