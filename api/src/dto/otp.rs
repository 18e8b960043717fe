use chrono::{DateTime, Utc};
use sc_shared::utils::phone::is_valid_national_mobile;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const PHONE_REQUIRED_MESSAGE: &str = "Phone number is required";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid 10-digit phone number";
pub const PHONE_AND_OTP_REQUIRED_MESSAGE: &str = "Phone and OTP are required";

fn validate_national_mobile(phone: &str) -> Result<(), ValidationError> {
    if is_valid_national_mobile(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("INVALID_PHONE_NUMBER").with_message(Cow::from(INVALID_PHONE_MESSAGE)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// 10-digit Indian mobile number, e.g. "9876543210"
    #[serde(default)]
    #[validate(custom(code = "INVALID_PHONE_NUMBER", function = "validate_national_mobile"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub expires_at: DateTime<Utc>,
    /// Seconds the code stays valid
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    /// Phone number in any accepted format
    #[serde(default)]
    pub phone: String,

    /// The 6-digit code
    #[serde(default)]
    pub otp: String,
}

impl VerifyOtpRequest {
    pub fn is_complete(&self) -> bool {
        !self.phone.trim().is_empty() && !self.otp.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    /// Canonical phone number that was verified
    pub phone: String,
}
