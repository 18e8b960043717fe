//! Shared utilities and common types for the SelfCruz server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Phone number canonicalization and masking
//! - Response envelope

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, GupshupConfig, LogFormat, LoggingConfig, NotificationConfig,
    NotificationProvider, OtpConfig, ServerConfig,
};
pub use types::ApiResponse;
pub use utils::phone;
