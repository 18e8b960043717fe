use actix_web::{web, HttpResponse};
use sc_shared::utils::phone::mask_phone_number;
use sc_shared::ApiResponse;
use tracing::info;

use crate::dto::otp::{VerifyOtpRequest, VerifyOtpResponse, PHONE_AND_OTP_REQUIRED_MESSAGE};
use crate::handlers::error::{handle_domain_error, validation_error};
use crate::routes::otp::AppState;

/// Handler for POST /api/user/verify-otp
///
/// # Request Body
///
/// ```json
/// { "phone": "9876543210", "otp": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP verified successfully",
///     "data": { "phone": "919876543210" },
///     "timestamp": "2025-08-14T10:01:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `OTP_NOT_FOUND`, `OTP_EXPIRED`, `INVALID_OTP`, `VALIDATION_ERROR`
/// - 429 `TOO_MANY_ATTEMPTS`
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if !request.is_complete() {
        return validation_error(PHONE_AND_OTP_REQUIRED_MESSAGE);
    }

    info!(phone = %mask_phone_number(&request.phone), "Processing verify-otp request");

    match state
        .otp_service
        .verify_otp(&request.phone, request.otp.trim())
        .await
    {
        Ok(approved) => HttpResponse::Ok().json(ApiResponse::success_with_message(
            "OTP verified successfully",
            VerifyOtpResponse {
                phone: approved.phone,
            },
        )),
        Err(e) => handle_domain_error(&e),
    }
}
