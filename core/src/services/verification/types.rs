//! Types for verification service results

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::entities::{VerificationRecord, VerificationState};

/// A freshly issued code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// Email the code is bound to
    pub email: String,
    /// The 6-digit code
    pub code: String,
    /// Instant from which the code is no longer valid
    pub expires_at: DateTime<Utc>,
    /// Issue time
    pub issued_at: DateTime<Utc>,
}

impl IssuedCode {
    /// Length of the validity window
    pub fn expires_in(&self) -> Duration {
        self.expires_at - self.issued_at
    }
}

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The stored code
    pub issued: IssuedCode,
    /// Message id from the email provider
    pub message_id: String,
}

/// Read-only view of an outstanding record
///
/// The code itself is never part of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingVerification {
    pub email: String,
    pub state: VerificationState,
    pub attempts: u32,
    pub remaining_attempts: u32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PendingVerification {
    pub(crate) fn from_record(
        record: &VerificationRecord,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Self {
        Self {
            email: record.email.clone(),
            state: record.state_at(now, max_attempts),
            attempts: record.attempts,
            remaining_attempts: record.remaining_attempts(max_attempts),
            expires_at: record.expires_at,
            created_at: record.created_at,
        }
    }
}
