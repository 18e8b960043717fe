use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use sc_api::middleware::cors::create_cors;
use sc_api::routes::{self, otp::AppState};
use sc_api::telemetry::init_tracing;
use sc_core::repositories::InMemoryOtpStore;
use sc_core::services::otp::{OtpService, OtpServiceConfig};
use sc_infra::create_notification_sender;
use sc_shared::{AppConfig, Environment};
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then the generic .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        provider = ?config.notification.provider,
        "Starting SelfCruz API server"
    );

    let sender = create_notification_sender(&config.notification)?;
    let store = Arc::new(InMemoryOtpStore::new());
    let otp_service = Arc::new(
        OtpService::start(sender, store, OtpServiceConfig::from(&config.otp)).await?,
    );

    let state = web::Data::new(AppState::new(otp_service.clone()));
    let environment = config.environment;
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(environment))
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    otp_service.shutdown().await;
    info!("Server stopped");
    Ok(())
}
