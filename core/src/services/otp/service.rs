//! Main OTP service implementation

use std::sync::Arc;

use chrono::Utc;
use sc_shared::utils::phone::{mask_phone_number, normalize_phone_number};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::entities::otp_record::{OtpRecord, VerificationOutcome};
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::OtpStore;

use super::config::OtpServiceConfig;
use super::sweeper::SweepTask;
use super::traits::NotificationSender;
use super::types::{Approved, IssuedOtp, OtpMessage};

/// Issues and verifies one-time codes keyed by canonical phone number
pub struct OtpService<S: NotificationSender + ?Sized, T: OtpStore + ?Sized> {
    /// Provider delivering the codes
    sender: Arc<S>,
    /// Store owning every outstanding code
    store: Arc<T>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Background sweep, present between `start` and `shutdown`
    sweeper: Mutex<Option<SweepTask>>,
}

impl<S, T> OtpService<S, T>
where
    S: NotificationSender + ?Sized + 'static,
    T: OtpStore + ?Sized + 'static,
{
    /// Create a service without a background sweep.
    ///
    /// Expired codes are still rejected on verification; use
    /// [`OtpService::start`] in long-running processes.
    pub fn new(sender: Arc<S>, store: Arc<T>, config: OtpServiceConfig) -> Self {
        Self {
            sender,
            store,
            config,
            sweeper: Mutex::new(None),
        }
    }

    /// Initialize the store and start the periodic sweep of expired codes
    pub async fn start(sender: Arc<S>, store: Arc<T>, config: OtpServiceConfig) -> DomainResult<Self> {
        store.init().await?;

        let service = Self::new(sender, store, config);
        let task = SweepTask::spawn(service.store.clone(), service.config.sweep_interval);
        *service.sweeper.lock().await = Some(task);

        info!(
            provider = service.sender.provider_name(),
            ttl_seconds = service.config.ttl.num_seconds(),
            max_attempts = service.config.max_attempts,
            "OTP service started"
        );

        Ok(service)
    }

    /// Stop the background sweep. Issuing and verifying keep working.
    pub async fn shutdown(&self) {
        let task = self.sweeper.lock().await.take();
        if let Some(task) = task {
            task.shutdown().await;
        }
    }

    /// Whether the background sweep is running
    pub async fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .await
            .as_ref()
            .map(SweepTask::is_running)
            .unwrap_or(false)
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// The store holding outstanding codes
    pub fn store(&self) -> &Arc<T> {
        &self.store
    }

    /// Canonicalize `phone` into the record key
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - The input contains no digits
    pub fn normalize(&self, phone: &str) -> DomainResult<String> {
        let normalized = normalize_phone_number(phone, &self.config.default_country_code);
        if normalized.is_empty() {
            return Err(DomainError::Validation {
                message: "Phone number is required".to_string(),
            });
        }
        Ok(normalized)
    }

    /// Issue a new code for `phone` and deliver it.
    ///
    /// This method:
    /// 1. Canonicalizes the phone number
    /// 2. Stores a fresh record, replacing any previous code for the number
    /// 3. Sends the code through the notification provider, bounded by the
    ///    send timeout
    /// 4. On a failed or timed-out send, undoes step 2: the replaced code is
    ///    reinstated (or the entry removed) unless a newer request has already
    ///    replaced the record
    ///
    /// # Returns
    /// * `Ok(IssuedOtp)` - Code stored and accepted by the provider
    /// * `Err(DomainError::Otp(OtpError::TransportFailure))` - Provider failed
    /// * `Err(DomainError::Validation)` - Empty phone number
    pub async fn request_otp(&self, phone: &str) -> DomainResult<IssuedOtp> {
        let phone = self.normalize(phone)?;
        let masked = mask_phone_number(&phone);

        let record = OtpRecord::new_with_ttl(phone.clone(), self.config.ttl);
        let record_id = record.id;
        let code = record.code.clone();
        let expires_at = record.expires_at;

        let previous = self.store.put(record).await?;
        if previous.is_some() {
            info!(
                phone = %masked,
                event = "otp_replaced",
                "Previous OTP invalidated by a new request"
            );
        }

        let message = OtpMessage::new(code.clone(), self.config.ttl_minutes());
        let send = self.sender.send(&phone, &message);

        let failure = match tokio::time::timeout(self.config.send_timeout, send).await {
            Ok(Ok(message_id)) => {
                info!(
                    phone = %masked,
                    provider = self.sender.provider_name(),
                    message_id = %message_id,
                    event = "otp_sent",
                    "OTP issued and delivered"
                );
                return Ok(IssuedOtp {
                    record_id,
                    phone,
                    code,
                    expires_at,
                    message_id,
                });
            }
            Ok(Err(message)) => message,
            Err(_) => format!(
                "Notification provider did not respond within {} seconds",
                self.config.send_timeout.as_secs_f64()
            ),
        };

        warn!(
            phone = %masked,
            provider = self.sender.provider_name(),
            error = %failure,
            event = "otp_send_failed",
            "Failed to deliver OTP, rolling back"
        );

        if let Err(e) = self
            .store
            .restore_if_issued(&phone, record_id, previous)
            .await
        {
            error!(
                phone = %masked,
                error = %e,
                event = "otp_rollback_failed",
                "Failed to roll back OTP after delivery failure"
            );
        }

        Err(OtpError::TransportFailure { message: failure }.into())
    }

    /// Verify `submitted` against the outstanding code for `phone`.
    ///
    /// Exactly [`OtpServiceConfig::max_attempts`] wrong guesses are answered
    /// with `InvalidCode`; the call after that reports `TooManyAttempts` and
    /// discards the code, whatever was submitted.
    ///
    /// # Returns
    /// * `Ok(Approved)` - Code matched and is now consumed
    /// * `Err(DomainError::Otp(..))` - `NotFound`, `Expired`,
    ///   `TooManyAttempts` or `InvalidCode`
    pub async fn verify_otp(&self, phone: &str, submitted: &str) -> DomainResult<Approved> {
        let phone = self.normalize(phone)?;
        let masked = mask_phone_number(&phone);
        let now = Utc::now();

        let outcome = self
            .store
            .verify(&phone, submitted, now, self.config.max_attempts)
            .await
            .map_err(|e| {
                error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_verification_error",
                    "Store error during OTP verification"
                );
                e
            })?;

        match outcome {
            VerificationOutcome::Approved => {
                info!(phone = %masked, event = "otp_verified", "OTP verified");
                Ok(Approved {
                    phone,
                    verified_at: now,
                })
            }
            VerificationOutcome::NotFound => Err(OtpError::NotFound.into()),
            VerificationOutcome::Expired => {
                info!(phone = %masked, event = "otp_expired", "Expired OTP discarded");
                Err(OtpError::Expired.into())
            }
            VerificationOutcome::TooManyAttempts => {
                warn!(
                    phone = %masked,
                    event = "otp_attempts_exhausted",
                    "OTP discarded after too many failed attempts"
                );
                Err(OtpError::TooManyAttempts.into())
            }
            VerificationOutcome::InvalidCode { remaining_attempts } => {
                warn!(
                    phone = %masked,
                    remaining_attempts,
                    event = "otp_verification_failed",
                    "Invalid OTP submitted"
                );
                Err(OtpError::InvalidCode { remaining_attempts }.into())
            }
        }
    }
}
