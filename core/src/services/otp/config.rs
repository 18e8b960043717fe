//! Configuration for the OTP service

use std::time::Duration as StdDuration;

use chrono::Duration;
use sc_shared::config::otp::{OtpConfig, MAX_OTP_TTL_SECONDS, MAX_PERIOD_SECONDS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// How long an issued code stays valid
    pub ttl: Duration,
    /// Wrong guesses tolerated per code
    pub max_attempts: u32,
    /// Upper bound on a single notification send
    pub send_timeout: StdDuration,
    /// Period of the background sweep of expired codes
    pub sweep_interval: StdDuration,
    /// Country code applied to bare 10-digit numbers
    pub default_country_code: String,
}

impl OtpServiceConfig {
    /// Code validity rounded up to whole minutes, as shown to users
    pub fn ttl_minutes(&self) -> u64 {
        let seconds = self.ttl.num_seconds().max(0) as u64;
        seconds.div_ceil(60)
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl: Duration::seconds(config.ttl_seconds.min(MAX_OTP_TTL_SECONDS) as i64),
            max_attempts: config.max_attempts,
            // tokio intervals reject a zero period
            send_timeout: clamp_period(config.send_timeout_seconds),
            sweep_interval: clamp_period(config.sweep_interval_seconds),
            default_country_code: config.default_country_code.clone(),
        }
    }
}

fn clamp_period(seconds: u64) -> StdDuration {
    StdDuration::from_secs(seconds.clamp(1, MAX_PERIOD_SECONDS))
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_shared_config() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.ttl, Duration::minutes(5));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.sweep_interval, StdDuration::from_secs(60));
        assert_eq!(config.send_timeout, StdDuration::from_secs(10));
        assert_eq!(config.ttl_minutes(), 5);
    }

    #[test]
    fn test_zero_periods_are_clamped() {
        let shared = OtpConfig {
            sweep_interval_seconds: 0,
            send_timeout_seconds: 0,
            ..OtpConfig::default()
        };
        let config = OtpServiceConfig::from(&shared);
        assert_eq!(config.sweep_interval, StdDuration::from_secs(1));
        assert_eq!(config.send_timeout, StdDuration::from_secs(1));
    }

    #[test]
    fn test_oversized_values_are_capped() {
        let shared = OtpConfig {
            ttl_seconds: u64::MAX / 2,
            sweep_interval_seconds: u64::MAX,
            send_timeout_seconds: u64::MAX,
            ..OtpConfig::default()
        };
        let config = OtpServiceConfig::from(&shared);
        assert_eq!(config.ttl, Duration::days(1));
        assert_eq!(config.sweep_interval, StdDuration::from_secs(86_400));
        assert_eq!(config.send_timeout, StdDuration::from_secs(86_400));
        assert_eq!(config.ttl_minutes(), 1_440);
    }
}
