//! Verification record entity for email-based one-time codes.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued (keeps every code at six digits)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Observable state of a stored record at a given instant
///
/// A record that does not exist is `NONE` and one that was verified is gone
/// (`CONSUMED`); neither has a stored representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    /// Code can still be verified
    Active,
    /// `expires_at` has been reached
    Expired,
    /// Failed attempts reached the cap
    Locked,
}

/// Outstanding one-time code for a single email address
///
/// There is at most one record per email; issuing again overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Email address the code was issued for (unique key)
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Instant from which the code is no longer valid
    pub expires_at: DateTime<Utc>,

    /// Failed verification attempts since the code was (re)generated
    pub attempts: u32,

    /// When the record was first created
    pub created_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a new record with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `email` - The email address the code is bound to
    /// * `expiration_minutes` - Minutes until the code expires
    /// * `now` - Issue time
    pub fn new(email: String, expiration_minutes: i64, now: DateTime<Utc>) -> Self {
        Self {
            email,
            code: Self::generate_code(),
            expires_at: now + Duration::minutes(expiration_minutes),
            attempts: 0,
            created_at: now,
        }
    }

    /// Generates a 6-digit code drawn uniformly from `[CODE_MIN, CODE_MAX]`
    ///
    /// Uses the OS CSPRNG.
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Replaces the code, restarts the expiry window and clears failed attempts
    ///
    /// `created_at` is kept: it records when the row appeared, not the code.
    pub fn reissue(&mut self, expiration_minutes: i64, now: DateTime<Utc>) {
        self.code = Self::generate_code();
        self.expires_at = now + Duration::minutes(expiration_minutes);
        self.attempts = 0;
    }

    /// Checks whether the code has expired at `now`
    ///
    /// The code is invalid from `expires_at` onward.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether failed attempts have reached `max_attempts`
    pub fn is_locked(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// State of the record at `now`, expiry taking precedence over lockout
    pub fn state_at(&self, now: DateTime<Utc>, max_attempts: u32) -> VerificationState {
        if self.is_expired_at(now) {
            VerificationState::Expired
        } else if self.is_locked(max_attempts) {
            VerificationState::Locked
        } else {
            VerificationState::Active
        }
    }

    /// Number of failed attempts still allowed
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Time left until expiry, or zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
