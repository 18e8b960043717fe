//! Conversion of domain errors into HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use sc_core::errors::{DomainError, OtpError};
use sc_shared::ApiResponse;
use serde_json::json;
use tracing::{error, warn};

/// HTTP status for each domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Otp(otp_error) => match otp_error {
            OtpError::NotFound | OtpError::Expired | OtpError::InvalidCode { .. } => {
                StatusCode::BAD_REQUEST
            }
            OtpError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            OtpError::TransportFailure { .. } => StatusCode::BAD_GATEWAY,
        },
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        error!(error = %error, code = error.error_code(), "Request failed");
    } else {
        warn!(code = error.error_code(), "Request rejected");
    }

    let mut body = ApiResponse::<serde_json::Value>::error(error.error_code(), error.public_message());
    if let DomainError::Otp(OtpError::InvalidCode { remaining_attempts }) = error {
        body.data = Some(json!({ "remaining_attempts": remaining_attempts }));
    }

    HttpResponse::build(status).json(body)
}

/// 400 response for request validation failures
pub fn validation_error(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error("VALIDATION_ERROR", message))
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Malformed JSON payload");
    let response = validation_error("Invalid request body");
    InternalError::from_response(err, response).into()
}
