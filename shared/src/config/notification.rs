//! Notification provider configuration (WhatsApp via Gupshup, console for development)

use serde::{Deserialize, Serialize};

/// Gupshup WhatsApp template endpoint
pub const DEFAULT_GUPSHUP_API_URL: &str = "https://api.gupshup.io/wa/api/v1/template/msg";

/// Which provider delivers one-time codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationProvider {
    /// Log messages locally instead of delivering them
    #[default]
    Console,
    /// WhatsApp template messages through Gupshup
    Gupshup,
}

impl std::str::FromStr for NotificationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "mock" => Ok(NotificationProvider::Console),
            "gupshup" | "whatsapp" => Ok(NotificationProvider::Gupshup),
            _ => Err(format!("Unknown notification provider: {}", s)),
        }
    }
}

/// Gupshup WhatsApp API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GupshupConfig {
    /// Template message endpoint
    pub api_url: String,
    /// API key sent in the `apikey` header
    pub api_key: String,
    /// Registered WhatsApp business number
    pub source: String,
    /// Gupshup app name (`src.name`)
    pub app_name: String,
    /// Approved OTP template identifier
    pub template_id: String,
}

impl Default for GupshupConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GUPSHUP_API_URL.to_string(),
            api_key: String::new(),
            source: String::from("918484958580"),
            app_name: String::from("selfcruzlogin"),
            template_id: String::from("1735f0b5-500d-43e5-9049-bfe635b7fd4d"),
        }
    }
}

impl GupshupConfig {
    /// Load from `GUPSHUP_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("GUPSHUP_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("GUPSHUP_API_KEY").unwrap_or(defaults.api_key),
            source: std::env::var("GUPSHUP_SOURCE").unwrap_or(defaults.source),
            app_name: std::env::var("GUPSHUP_APP_NAME").unwrap_or(defaults.app_name),
            template_id: std::env::var("GUPSHUP_TEMPLATE_ID").unwrap_or(defaults.template_id),
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Selected provider
    pub provider: NotificationProvider,
    /// Gupshup settings, used when `provider` is `Gupshup`
    pub gupshup: GupshupConfig,
}

impl NotificationConfig {
    /// Load from `NOTIFICATION_PROVIDER` and `GUPSHUP_*`
    pub fn from_env() -> Self {
        let provider = std::env::var("NOTIFICATION_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self {
            provider,
            gupshup: GupshupConfig::from_env(),
        }
    }
}
