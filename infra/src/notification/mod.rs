//! Notification Module
//!
//! Providers that deliver one-time codes to users. Each implements the core
//! `NotificationSender` trait so the OTP service stays provider-agnostic.
//!
//! ## Features
//!
//! - **Gupshup**: WhatsApp template messages for production
//! - **Console**: Local output for development
//! - **Security**: Phone number masking in logs

use std::sync::Arc;

use sc_core::services::otp::NotificationSender;
use sc_shared::config::{NotificationConfig, NotificationProvider};
use tracing::info;

use crate::InfrastructureError;

pub mod console;
pub mod gupshup;

pub use console::ConsoleNotificationSender;
pub use gupshup::GupshupWhatsAppSender;


/// Create a notification sender based on configuration
///
/// # Arguments
///
/// * `config` - Notification configuration selecting the provider
///
/// # Returns
///
/// The sender for the configured provider, or a configuration error when the
/// provider's credentials are missing
pub fn create_notification_sender(
    config: &NotificationConfig,
) -> Result<Arc<dyn NotificationSender>, InfrastructureError> {
    let sender: Arc<dyn NotificationSender> = match config.provider {
        NotificationProvider::Console => Arc::new(ConsoleNotificationSender::new()),
        NotificationProvider::Gupshup => {
            Arc::new(GupshupWhatsAppSender::new(config.gupshup.clone())?)
        }
    };

    info!(provider = sender.provider_name(), "Notification sender created");
    Ok(sender)
}
