pub mod otp;

use actix_web::{web, HttpResponse};
use sc_shared::ApiResponse;

use crate::handlers::error::json_error_handler;

/// Register every route and the JSON extractor configuration
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/user")
                .route("/send-otp", web::post().to(otp::send_otp::send_otp))
                .route("/verify-otp", web::post().to(otp::verify_otp::verify_otp)),
        )
        .default_service(web::route().to(not_found));
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "selfcruz-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
