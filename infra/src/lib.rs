//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SelfCruz backend.
//! It provides the concrete notification providers that deliver one-time
//! codes on behalf of the core OTP service.
//!
//! ## Providers
//!
//! - **Gupshup**: WhatsApp template messages over the Gupshup HTTP API
//! - **Console**: Logs codes locally for development and tests

/// Notification module - OTP delivery providers
pub mod notification;

pub use notification::{
    create_notification_sender, ConsoleNotificationSender, GupshupWhatsAppSender,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification provider rejected or failed the message
    #[error("Notification provider error: {0}")]
    Notification(String),
}
