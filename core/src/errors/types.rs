//! Error kinds for the OTP lifecycle
//!
//! Every kind carries a machine-readable code and a message that is safe to
//! show to the end user.

use thiserror::Error;

/// Failures of issuing or verifying a one-time code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The notification provider rejected the message, errored, or timed out
    #[error("{message}")]
    TransportFailure { message: String },

    /// No live code for this phone number
    #[error("OTP not found. Please request a new OTP.")]
    NotFound,

    /// The code outlived its TTL
    #[error("OTP has expired. Please request a new OTP.")]
    Expired,

    /// The guess budget for this code is spent
    #[error("Too many failed attempts. Please request a new OTP.")]
    TooManyAttempts,

    /// Wrong code, guesses remain
    #[error("Invalid OTP. Please try again.")]
    InvalidCode { remaining_attempts: u32 },
}

impl OtpError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::TransportFailure { .. } => "TRANSPORT_FAILURE",
            OtpError::NotFound => "OTP_NOT_FOUND",
            OtpError::Expired => "OTP_EXPIRED",
            OtpError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            OtpError::InvalidCode { .. } => "INVALID_OTP",
        }
    }
}
