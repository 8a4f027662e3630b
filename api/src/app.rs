//! Application factory
//!
//! Builds the actix-web application for the configured deployment variant.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use vm_shared::config::ServiceVariant;

use crate::handlers::{json_error_handler, not_found};
use crate::routes::{health::health_check, verification, AppState};

/// Mount the routes of one deployment variant under `/api/v1`
///
/// Generation-only exposes `/captcha`; validating exposes `/verify-code`
/// and `/verify-code/check`. The other variant's routes fall through to 404.
pub fn configure_routes(cfg: &mut web::ServiceConfig, variant: ServiceVariant) {
    let scope = web::scope("/api/v1");

    let scope = match variant {
        ServiceVariant::GenerationOnly => {
            scope.route("/captcha", web::post().to(verification::captcha))
        }
        ServiceVariant::Validating => scope
            .route("/verify-code", web::post().to(verification::verify_code))
            .route("/verify-code/check", web::post().to(verification::check_code)),
    };

    cfg.route("/health", web::get().to(health_check)).service(scope);
}

/// Create the application with request tracing and JSON error handling
pub fn create_app(
    app_state: web::Data<AppState>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let variant = app_state.verification_service.variant();

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .wrap(TracingLogger::default())
        .configure(|cfg| configure_routes(cfg, variant))
        .default_service(web::route().to(not_found))
}
