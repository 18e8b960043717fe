use actix_web::{web, HttpResponse};
use sc_shared::utils::phone::mask_phone_number;
use sc_shared::ApiResponse;
use tracing::info;
use validator::Validate;

use crate::dto::otp::{SendOtpRequest, SendOtpResponse, INVALID_PHONE_MESSAGE, PHONE_REQUIRED_MESSAGE};
use crate::handlers::error::{handle_domain_error, validation_error};
use crate::routes::otp::AppState;

/// Handler for POST /api/user/send-otp
///
/// Issues a one-time code and delivers it over WhatsApp.
///
/// # Request Body
///
/// ```json
/// { "phone": "9876543210" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent successfully via WhatsApp",
///     "data": { "expires_at": "2025-08-14T10:05:00Z", "expires_in": 300 },
///     "timestamp": "2025-08-14T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR` for a missing or malformed phone number
/// - 502 `TRANSPORT_FAILURE` when the provider did not accept the message
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if request.phone.trim().is_empty() {
        return validation_error(PHONE_REQUIRED_MESSAGE);
    }
    if request.validate().is_err() {
        return validation_error(INVALID_PHONE_MESSAGE);
    }

    info!(phone = %mask_phone_number(&request.phone), "Processing send-otp request");

    match state.otp_service.request_otp(&request.phone).await {
        Ok(issued) => HttpResponse::Ok().json(ApiResponse::success_with_message(
            "OTP sent successfully via WhatsApp",
            SendOtpResponse {
                expires_at: issued.expires_at,
                expires_in: state.otp_service.config().ttl.num_seconds(),
            },
        )),
        Err(e) => handle_domain_error(&e),
    }
}
