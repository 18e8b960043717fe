//! One-time code record for phone verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of wrong guesses tolerated per code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default validity of a code (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// Smallest code ever issued
const CODE_MIN: u32 = 100_000;

/// Largest code ever issued
const CODE_MAX: u32 = 999_999;

/// Result of checking a submitted code against the record for a phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Code matched; the record is consumed
    Approved,
    /// No live record for the phone number
    NotFound,
    /// Record outlived its TTL; the record is discarded
    Expired,
    /// Guess budget was already spent; the record is discarded
    TooManyAttempts,
    /// Wrong code; the record is kept with one more failed attempt
    InvalidCode { remaining_attempts: u32 },
}

impl VerificationOutcome {
    /// Whether the record must be removed after this outcome
    pub fn consumes_record(&self) -> bool {
        !matches!(self, VerificationOutcome::InvalidCode { .. })
    }
}

/// Outstanding verification challenge for one canonical phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Identifies this issuance, so rollbacks never touch a newer replacement
    pub id: Uuid,

    /// Canonical phone number (digits only, country code applied)
    pub phone: String,

    /// The 6-digit code
    pub code: String,

    /// Failed verification attempts so far
    pub attempts: u32,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record with a fresh random code and the default TTL
    pub fn new(phone: String) -> Self {
        Self::new_with_ttl(phone, Duration::seconds(DEFAULT_EXPIRATION_SECONDS))
    }

    /// Creates a record with a fresh random code expiring `ttl` from now
    pub fn new_with_ttl(phone: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Draws a code uniformly from `100000..=999999`.
    ///
    /// `thread_rng` is not hardened against state recovery; brute-force
    /// resistance comes from the attempt cap, not from the generator.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Checks if the record has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Wrong guesses left before the record is discarded
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Applies one verification attempt.
    ///
    /// Order of checks: expiry, then the attempt budget, then the code.
    /// A wrong code increments `attempts` and keeps the record even when the
    /// budget is now spent; the next call reports `TooManyAttempts`. Callers
    /// remove the record whenever [`VerificationOutcome::consumes_record`]
    /// holds.
    pub fn check(
        &mut self,
        submitted: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> VerificationOutcome {
        if self.is_expired_at(now) {
            return VerificationOutcome::Expired;
        }

        if self.attempts >= max_attempts {
            return VerificationOutcome::TooManyAttempts;
        }

        if constant_time_eq(self.code.as_bytes(), submitted.as_bytes()) {
            VerificationOutcome::Approved
        } else {
            self.attempts += 1;
            VerificationOutcome::InvalidCode {
                remaining_attempts: self.remaining_attempts(max_attempts),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "919876543210";

    #[test]
    fn test_new_record() {
        let record = OtpRecord::new(PHONE.to_string());

        assert_eq!(record.phone, PHONE);
        assert_eq!(record.code.len(), CODE_LENGTH);
        assert_eq!(record.attempts, 0);
        assert!(!record.is_expired_at(Utc::now()));
        assert_eq!(
            record.expires_at - record.created_at,
            Duration::seconds(DEFAULT_EXPIRATION_SECONDS)
        );
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..1000 {
            let code = OtpRecord::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let num: u32 = code.parse().expect("code should be numeric");
            assert!((CODE_MIN..=CODE_MAX).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| OtpRecord::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_check_success() {
        let mut record = OtpRecord::new(PHONE.to_string());
        let code = record.code.clone();

        let outcome = record.check(&code, Utc::now(), MAX_ATTEMPTS);
        assert_eq!(outcome, VerificationOutcome::Approved);
        assert!(outcome.consumes_record());
        assert_eq!(record.attempts, 0);
    }

    #[test]
    fn test_check_wrong_code_keeps_record() {
        let mut record = OtpRecord::new(PHONE.to_string());

        let outcome = record.check("000000", Utc::now(), MAX_ATTEMPTS);
        assert_eq!(outcome, VerificationOutcome::InvalidCode { remaining_attempts: 2 });
        assert!(!outcome.consumes_record());
        assert_eq!(record.attempts, 1);
    }

    #[test]
    fn test_third_wrong_guess_is_still_invalid_code() {
        let mut record = OtpRecord::new(PHONE.to_string());
        let correct = record.code.clone();

        for expected_remaining in [2, 1, 0] {
            let outcome = record.check("000000", Utc::now(), MAX_ATTEMPTS);
            assert_eq!(
                outcome,
                VerificationOutcome::InvalidCode { remaining_attempts: expected_remaining }
            );
        }
        assert_eq!(record.attempts, MAX_ATTEMPTS);

        // Budget is checked before the code, so even the right code is refused
        let outcome = record.check(&correct, Utc::now(), MAX_ATTEMPTS);
        assert_eq!(outcome, VerificationOutcome::TooManyAttempts);
        assert!(outcome.consumes_record());
    }

    #[test]
    fn test_expiry_checked_first() {
        let mut record = OtpRecord::new_with_ttl(PHONE.to_string(), Duration::seconds(60));
        record.attempts = MAX_ATTEMPTS;
        let code = record.code.clone();

        let later = record.expires_at + Duration::milliseconds(1);
        assert_eq!(record.check(&code, later, MAX_ATTEMPTS), VerificationOutcome::Expired);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let mut record = OtpRecord::new(PHONE.to_string());
        let code = record.code.clone();
        let at_expiry = record.expires_at;

        assert!(!record.is_expired_at(at_expiry));
        assert_eq!(record.check(&code, at_expiry, MAX_ATTEMPTS), VerificationOutcome::Approved);
    }

    #[test]
    fn test_check_rejects_prefix_and_padding() {
        let mut record = OtpRecord::new(PHONE.to_string());
        let code = record.code.clone();

        assert!(matches!(
            record.check(&code[..5], Utc::now(), MAX_ATTEMPTS),
            VerificationOutcome::InvalidCode { .. }
        ));
        assert!(matches!(
            record.check(&format!(" {}", code), Utc::now(), MAX_ATTEMPTS),
            VerificationOutcome::InvalidCode { .. }
        ));
    }

    #[test]
    fn test_serialization() {
        let record = OtpRecord::new(PHONE.to_string());

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: OtpRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
