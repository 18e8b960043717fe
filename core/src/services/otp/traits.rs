//! Trait for notification provider integration

use async_trait::async_trait;

use super::types::OtpMessage;

/// Delivers one-time codes to a phone number (WhatsApp template, SMS, console)
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send `message` to the canonical phone number `destination`.
    ///
    /// Returns the provider's message id once the provider has accepted the
    /// message, or the provider's error message on a definite failure.
    async fn send(&self, destination: &str, message: &OtpMessage) -> Result<String, String>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;
}
