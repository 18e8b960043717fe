//! In-memory OTP store for single-process deployments

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpRecord, VerificationOutcome};
use crate::errors::DomainError;

use super::trait_::OtpStore;

/// OTP store backed by a `HashMap` behind one async `RwLock`.
///
/// Every operation holds the lock only for its own map access, never across
/// an outbound call, so per-key operations are linearized while sends for
/// different numbers proceed concurrently.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn init(&self) -> Result<(), DomainError> {
        self.records.write().await.clear();
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(phone).cloned())
    }

    async fn put(&self, record: OtpRecord) -> Result<Option<OtpRecord>, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.insert(record.phone.clone(), record))
    }

    async fn delete(&self, phone: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(phone).is_some())
    }

    async fn restore_if_issued(
        &self,
        phone: &str,
        id: Uuid,
        previous: Option<OtpRecord>,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        if !matches!(records.get(phone), Some(record) if record.id == id) {
            return Ok(false);
        }

        match previous {
            Some(previous) => {
                records.insert(phone.to_string(), previous);
            }
            None => {
                records.remove(phone);
            }
        }
        Ok(true)
    }

    async fn verify(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<VerificationOutcome, DomainError> {
        let mut records = self.records.write().await;

        let Some(record) = records.get_mut(phone) else {
            return Ok(VerificationOutcome::NotFound);
        };

        let outcome = record.check(code, now, max_attempts);
        if outcome.consumes_record() {
            records.remove(phone);
        }

        Ok(outcome)
    }

    async fn sweep(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        let removed = before - records.len();

        if removed > 0 {
            debug!(removed, remaining = records.len(), "Swept expired OTP records");
        }

        Ok(removed)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.records.read().await.len())
    }
}
