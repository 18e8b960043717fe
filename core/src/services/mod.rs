//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Approved, IssuedOtp, NotificationSender, OtpMessage, OtpService, OtpServiceConfig, SweepTask,
};
