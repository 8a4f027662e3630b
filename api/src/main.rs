use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use vm_api::{create_app, telemetry, AppState};
use vm_core::services::verification::{VerificationService, VerificationServiceConfig};
use vm_infra::{create_code_store, create_delivery_channel};
use vm_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        variant = %config.verification.variant,
        "Starting VeriMail API Server"
    );

    let delivery = create_delivery_channel(&config.email);
    info!(
        provider = delivery.provider_name(),
        sender = %config.email.from_email,
        "Delivery channel ready"
    );

    let service_config =
        VerificationServiceConfig::from_settings(&config.verification, config.email.sender());

    let service = if config.requires_store() {
        let store = create_code_store(&config.cache)
            .await
            .context("Failed to initialize code store")?;
        VerificationService::with_store(delivery, store, service_config)
    } else {
        VerificationService::generation_only(delivery, service_config)
    };

    let app_state = web::Data::new(AppState::new(Arc::new(service)));
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), max_payload_size))
        .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
