//! OTP store trait defining the interface for one-time code persistence.
//!
//! The store exclusively owns every [`OtpRecord`]; callers never mutate
//! `attempts` or `expires_at` directly. Implementations must make each
//! method atomic with respect to concurrent calls for the same phone number:
//! readers observe either the previous record or the complete new one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpRecord, VerificationOutcome};
use crate::errors::DomainError;

/// Repository trait for one-time code records keyed by canonical phone number
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Prepare the backing storage. Called once before the store is used.
    async fn init(&self) -> Result<(), DomainError>;

    /// Fetch the record for `phone`, expired or not
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Insert `record`, replacing any record for the same phone number
    ///
    /// # Returns
    /// * `Ok(Some(previous))` - A prior record was replaced
    /// * `Ok(None)` - No record existed for the phone number
    async fn put(&self, record: OtpRecord) -> Result<Option<OtpRecord>, DomainError>;

    /// Remove the record for `phone`, returning whether one existed
    async fn delete(&self, phone: &str) -> Result<bool, DomainError>;

    /// Undo issuance `id` for `phone`, as long as it is still the current record.
    ///
    /// `previous` is put back in its place when given; otherwise the entry is
    /// removed. A record written after `id` is left untouched.
    ///
    /// # Returns
    /// * `Ok(true)` - Issuance `id` was current and has been undone
    /// * `Ok(false)` - A newer record (or none) was present; nothing changed
    async fn restore_if_issued(
        &self,
        phone: &str,
        id: Uuid,
        previous: Option<OtpRecord>,
    ) -> Result<bool, DomainError>;

    /// Atomically check `code` against the record for `phone`.
    ///
    /// Applies [`OtpRecord::check`] under the store's exclusion and then
    /// persists the result: the record is removed when the outcome consumes
    /// it and written back with the incremented attempt count otherwise.
    async fn verify(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<VerificationOutcome, DomainError>;

    /// Remove every record expired at `now`, returning how many were removed
    async fn sweep(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Number of records currently held, expired ones included
    async fn len(&self) -> Result<usize, DomainError>;
}
