//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{
    OtpRecord, VerificationOutcome, CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};
