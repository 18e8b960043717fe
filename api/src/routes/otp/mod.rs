//! Phone OTP login route handlers
//!
//! - `POST /api/user/send-otp` issues and delivers a code
//! - `POST /api/user/verify-otp` checks a submitted code

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use sc_core::repositories::InMemoryOtpStore;
use sc_core::services::otp::{NotificationSender, OtpService};

/// OTP service as wired by the API: any notification provider, in-memory store
pub type ApiOtpService = OtpService<dyn NotificationSender, InMemoryOtpStore>;

/// Application state that holds shared services
pub struct AppState {
    pub otp_service: Arc<ApiOtpService>,
}

impl AppState {
    pub fn new(otp_service: Arc<ApiOtpService>) -> Self {
        Self { otp_service }
    }
}
