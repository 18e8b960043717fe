//! OTP service module for phone-number based login
//!
//! This module provides the one-time code workflow:
//! - Code generation and delivery through a notification provider
//! - Verification with attempt tracking and single use
//! - Rollback of codes whose delivery failed
//! - Periodic sweep of expired codes

mod config;
mod service;
mod sweeper;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use sweeper::SweepTask;
pub use traits::NotificationSender;
pub use types::{Approved, IssuedOtp, OtpMessage};
