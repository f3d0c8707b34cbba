//! Verification failure taxonomy
//!
//! Every way `verify` can reject a code is a distinct variant so callers can
//! branch on the reason instead of matching message strings.

use thiserror::Error;

pub use crm_shared::types::response::ErrorResponse;

/// Reasons a submitted code is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// No outstanding code for the email
    #[error("No pending verification for this email")]
    NotFound,

    /// The code's expiry instant has been reached
    #[error("Verification code expired")]
    Expired,

    /// Failed attempts reached the cap; a new code must be requested
    #[error("Maximum verification attempts exceeded. Please request a new code")]
    TooManyAttempts,

    /// The code did not match; the failure was recorded
    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    InvalidCode {
        /// Failed attempts after this one
        attempts: u32,
        /// Failed attempts still allowed
        remaining_attempts: u32,
    },
}

impl VerificationError {
    /// Stable machine-readable code for this failure
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::NotFound => "VERIFICATION_NOT_FOUND",
            VerificationError::Expired => "CODE_EXPIRED",
            VerificationError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            VerificationError::InvalidCode { .. } => "INVALID_CODE",
        }
    }
}

/// Convert VerificationError to ErrorResponse
impl From<&VerificationError> for ErrorResponse {
    fn from(err: &VerificationError) -> Self {
        let response = ErrorResponse::new(err.error_code(), err.to_string());
        match err {
            VerificationError::InvalidCode { remaining_attempts, .. } => response
                .with_detail("remaining_attempts", serde_json::json!(remaining_attempts)),
            _ => response,
        }
    }
}
