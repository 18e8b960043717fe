//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

/// Default code validity (5 minutes)
pub const DEFAULT_OTP_TTL_SECONDS: u64 = 300;

/// Default number of wrong guesses tolerated per code
pub const DEFAULT_OTP_MAX_ATTEMPTS: u32 = 3;

/// Default interval between expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Default bound on a single notification send
pub const DEFAULT_SEND_TIMEOUT_SECONDS: u64 = 10;

/// Longest accepted code validity (one day)
pub const MAX_OTP_TTL_SECONDS: u64 = 86_400;

/// Longest accepted sweep interval or send timeout (one day)
pub const MAX_PERIOD_SECONDS: u64 = 86_400;

/// Country code prefixed to bare 10-digit national numbers
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Configuration for issuing and verifying one-time codes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a code stays valid after issuance
    pub ttl_seconds: u64,

    /// Wrong guesses tolerated before the code is discarded
    pub max_attempts: u32,

    /// Seconds between background sweeps of expired codes
    pub sweep_interval_seconds: u64,

    /// Seconds to wait for the notification provider
    pub send_timeout_seconds: u64,

    /// Country code applied to 10-digit numbers during normalization
    pub default_country_code: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            max_attempts: DEFAULT_OTP_MAX_ATTEMPTS,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
            send_timeout_seconds: DEFAULT_SEND_TIMEOUT_SECONDS,
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl OtpConfig {
    /// Load configuration from `OTP_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_seconds: env_or("OTP_TTL_SECONDS", defaults.ttl_seconds),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            sweep_interval_seconds: env_or(
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            send_timeout_seconds: env_or(
                "OTP_SEND_TIMEOUT_SECONDS",
                defaults.send_timeout_seconds,
            ),
            default_country_code: std::env::var("OTP_DEFAULT_COUNTRY_CODE")
                .ok()
                .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
                .unwrap_or(defaults.default_country_code),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
