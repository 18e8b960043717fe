//! Gupshup WhatsApp Sender
//!
//! Delivers one-time codes as WhatsApp template messages through the Gupshup
//! template API. The request is a form POST; the template id and its
//! parameters travel as a JSON string in the `template` field.

use async_trait::async_trait;
use sc_core::services::otp::{NotificationSender, OtpMessage};
use sc_shared::config::GupshupConfig;
use sc_shared::utils::phone::mask_phone_number;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::InfrastructureError;

/// Upper bound on a single HTTP exchange with Gupshup
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Status Gupshup reports for an accepted message
const STATUS_SUBMITTED: &str = "submitted";

/// Template reference carried in the `template` form field
#[derive(Debug, Serialize)]
struct TemplatePayload<'a> {
    id: &'a str,
    params: Vec<String>,
}

/// Body returned by the template endpoint
#[derive(Debug, Default, Deserialize)]
struct GupshupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "messageId")]
    message_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// WhatsApp template sender backed by the Gupshup API
pub struct GupshupWhatsAppSender {
    client: reqwest::Client,
    config: GupshupConfig,
}

impl GupshupWhatsAppSender {
    /// Create a new Gupshup sender
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - The API key is missing
    /// * `InfrastructureError::Http` - The HTTP client could not be built
    pub fn new(config: GupshupConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "GUPSHUP_API_KEY must be set to use the Gupshup provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        info!(
            app_name = %config.app_name,
            source = %mask_phone_number(&config.source),
            "Gupshup WhatsApp sender initialized"
        );

        Ok(Self { client, config })
    }

    /// Build the form fields for one template message
    fn form_fields(
        &self,
        destination: &str,
        message: &OtpMessage,
    ) -> Result<Vec<(&'static str, String)>, InfrastructureError> {
        let template = serde_json::to_string(&TemplatePayload {
            id: &self.config.template_id,
            params: message.template_params(),
        })
        .map_err(|e| InfrastructureError::Notification(format!("Invalid template payload: {}", e)))?;

        Ok(vec![
            ("channel", "whatsapp".to_string()),
            ("source", self.config.source.clone()),
            ("destination", destination.to_string()),
            ("src.name", self.config.app_name.clone()),
            ("template", template),
        ])
    }

    /// Send the template message and interpret Gupshup's answer
    async fn send_template(
        &self,
        destination: &str,
        message: &OtpMessage,
    ) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(destination);
        let fields = self.form_fields(destination, message)?;

        debug!(phone = %masked, "Sending WhatsApp template via Gupshup");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("apikey", &self.config.api_key)
            .header("Cache-Control", "no-cache")
            .form(&fields)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        // Error pages are not always JSON
        let parsed: GupshupResponse = serde_json::from_str(&body).unwrap_or_default();

        let submitted = parsed.status.as_deref() == Some(STATUS_SUBMITTED);
        if submitted || status.is_success() {
            let message_id = parsed
                .message_id
                .unwrap_or_else(|| format!("gupshup_{}", Uuid::new_v4()));
            info!(
                target: "notification",
                provider = "gupshup",
                phone = %masked,
                message_id = %message_id,
                "WhatsApp OTP submitted"
            );
            return Ok(message_id);
        }

        let reason = parsed
            .message
            .unwrap_or_else(|| format!("Gupshup responded with HTTP {}", status.as_u16()));
        error!(
            target: "notification",
            provider = "gupshup",
            phone = %masked,
            http_status = status.as_u16(),
            error = %reason,
            "Gupshup rejected the message"
        );
        Err(InfrastructureError::Notification(reason))
    }
}

#[async_trait]
impl NotificationSender for GupshupWhatsAppSender {
    async fn send(&self, destination: &str, message: &OtpMessage) -> Result<String, String> {
        self.send_template(destination, message)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "gupshup"
    }
}
