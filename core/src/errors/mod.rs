//! Domain-specific error types and error handling.

mod types;

pub use types::OtpError;

use thiserror::Error;

/// Message shown to callers in place of internal error details
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Otp(err) => err.error_code(),
        }
    }

    /// Message safe to return to callers; internal details are withheld
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Validation { message } => message.clone(),
            DomainError::Internal { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            DomainError::Otp(err) => err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
