//! Types for OTP service inputs and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The content handed to a notification provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpMessage {
    /// The one-time code
    pub code: String,
    /// Validity shown to the user, in minutes
    pub ttl_minutes: u64,
}

impl OtpMessage {
    pub fn new(code: impl Into<String>, ttl_minutes: u64) -> Self {
        Self {
            code: code.into(),
            ttl_minutes,
        }
    }

    /// Plain-text rendering for SMS-style providers
    pub fn to_text(&self) -> String {
        format!(
            "Your SelfCruz verification code is {}. It expires in {} minutes.",
            self.code, self.ttl_minutes
        )
    }

    /// Positional parameters for template-based providers
    pub fn template_params(&self) -> Vec<String> {
        vec![self.code.clone()]
    }
}

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// Identifier of the stored record
    pub record_id: Uuid,
    /// Canonical phone number the code was sent to
    pub phone: String,
    /// The code that was sent. Never echo this to HTTP clients.
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message id acknowledged by the provider
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approved {
    /// Canonical phone number that proved possession of the code
    pub phone: String,
    /// When the verification succeeded
    pub verified_at: DateTime<Utc>,
}
