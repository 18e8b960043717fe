//! Development notification sender.
//!
//! Nothing leaves the process: each message is written to the `notification`
//! tracing target, where a developer can read the code off the log.

use async_trait::async_trait;
use sc_core::services::otp::{NotificationSender, OtpMessage};
use sc_shared::utils::phone::mask_phone_number;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Sender selected by `NOTIFICATION_PROVIDER=console`.
///
/// Clones share one message counter. With `simulate_failure` set every send
/// is rejected, which exercises the rollback path without a real provider.
#[derive(Clone)]
pub struct ConsoleNotificationSender {
    message_count: Arc<AtomicU64>,
    simulate_failure: bool,
    /// Include the message text, code included, in the debug log
    log_content: bool,
}

impl ConsoleNotificationSender {
    /// Create a new console sender
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(log_content: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            log_content,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for ConsoleNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for ConsoleNotificationSender {
    async fn send(&self, destination: &str, message: &OtpMessage) -> Result<String, String> {
        let masked_phone = mask_phone_number(destination);

        if self.simulate_failure {
            warn!(
                target: "notification",
                provider = "console",
                phone = %masked_phone,
                "Console sender simulating failure"
            );
            return Err("Simulated notification failure".to_string());
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.log_content {
            debug!(
                target: "notification",
                provider = "console",
                phone = %masked_phone,
                message_id = %message_id,
                count,
                content = %message.to_text(),
                "OTP message content"
            );
        }

        info!(
            target: "notification",
            provider = "console",
            phone = %masked_phone,
            message_id = %message_id,
            count,
            "OTP message sent (console)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}
