//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use crm_shared::utils::mask_email;
use std::sync::Arc;
use tracing;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{VerificationRecord, VerificationState};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::VerificationRepository;

use super::config::VerificationServiceConfig;
use super::traits::EmailServiceTrait;
use super::types::{IssuedCode, PendingVerification, SendCodeResult};

/// How many times `verify` re-reads after losing a conditional write
const MAX_VERIFY_ROUNDS: usize = 5;

/// Verification service for handling email verification codes
///
/// States per email are implicit in the stored record: none, active,
/// expired, locked. A successful verification deletes the record.
pub struct VerificationService<R: VerificationRepository, N: EmailServiceTrait> {
    /// Record storage
    repository: Arc<R>,
    /// Email sender for delivering codes
    email_service: Arc<N>,
    /// Time source for every expiry decision
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<R: VerificationRepository, N: EmailServiceTrait> VerificationService<R, N> {
    /// Create a new verification service reading the system clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Record storage implementation
    /// * `email_service` - Email delivery implementation
    /// * `config` - Service configuration
    pub fn new(
        repository: Arc<R>,
        email_service: Arc<N>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            repository,
            email_service,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a fresh code for an email
    ///
    /// Overwrites any outstanding code for the email and resets its failed
    /// attempts. Nothing is sent; see [`Self::send_verification_code`].
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - The code is stored and can be verified
    /// * `Err(DomainError::Internal)` - The code could not be stored
    pub async fn issue(&self, email: &str) -> DomainResult<IssuedCode> {
        let now = self.clock.now();
        let record =
            VerificationRecord::new(email.to_string(), self.config.code_expiration_minutes, now);

        self.repository.upsert(&record).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            DomainError::Internal {
                message: format!("Failed to store verification code: {}", e),
            }
        })?;

        tracing::info!(
            email = %mask_email(email),
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued verification code"
        );

        Ok(IssuedCode {
            email: record.email,
            code: record.code,
            expires_at: record.expires_at,
            issued_at: now,
        })
    }

    /// Issue a code and deliver it by email
    ///
    /// The record is stored before delivery is attempted. When delivery
    /// fails the stored code stays valid and the caller gets
    /// `DomainError::Delivery`; issuing again acts as a resend.
    pub async fn send_verification_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let issued = self.issue(email).await?;

        let message_id = self
            .email_service
            .send_verification_code(email, &issued.code, self.config.code_expiration_minutes)
            .await
            .map_err(|e| {
                tracing::warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Delivery {
                    message: format!("Failed to send verification email: {}", e),
                }
            })?;

        tracing::info!(
            email = %mask_email(email),
            message_id = %message_id,
            event = "otp_sent",
            "Verification code sent"
        );

        Ok(SendCodeResult { issued, message_id })
    }

    /// Verify a submitted code
    ///
    /// Checks run in a fixed order: existence, expiry, lockout, match. A
    /// mismatch records one failed attempt; a match deletes the record.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The code matched and has been consumed
    /// * `Err(DomainError::Verification(_))` - The rejection reason
    /// * `Err(DomainError::Internal)` - Storage failure
    pub async fn verify(&self, email: &str, submitted_code: &str) -> DomainResult<()> {
        let max_attempts = self.config.max_attempts;

        for round in 0..MAX_VERIFY_ROUNDS {
            let record = match self.repository.find_by_email(email).await? {
                Some(record) => record,
                None => {
                    tracing::debug!(
                        email = %mask_email(email),
                        event = "otp_not_found",
                        "No pending verification"
                    );
                    return Err(VerificationError::NotFound.into());
                }
            };

            let now = self.clock.now();
            match record.state_at(now, max_attempts) {
                VerificationState::Expired => {
                    tracing::info!(
                        email = %mask_email(email),
                        event = "otp_expired",
                        "Verification code expired"
                    );
                    return Err(VerificationError::Expired.into());
                }
                VerificationState::Locked => {
                    tracing::warn!(
                        email = %mask_email(email),
                        attempts = record.attempts,
                        event = "otp_locked",
                        "Verification rejected after too many attempts"
                    );
                    return Err(VerificationError::TooManyAttempts.into());
                }
                VerificationState::Active => {}
            }

            if constant_time_eq(record.code.as_bytes(), submitted_code.as_bytes()) {
                if self.repository.consume(email, submitted_code, max_attempts, now).await? {
                    tracing::info!(
                        email = %mask_email(email),
                        event = "otp_verified",
                        "Verification code accepted"
                    );
                    return Ok(());
                }
            } else if let Some(attempts) = self
                .repository
                .increment_attempts(email, &record.code, max_attempts)
                .await?
            {
                let remaining_attempts = max_attempts.saturating_sub(attempts);
                tracing::warn!(
                    email = %mask_email(email),
                    attempts = attempts,
                    remaining_attempts = remaining_attempts,
                    event = "otp_mismatch",
                    "Invalid verification code"
                );
                return Err(VerificationError::InvalidCode {
                    attempts,
                    remaining_attempts,
                }
                .into());
            }

            // The record changed between the read and the conditional write
            tracing::debug!(
                email = %mask_email(email),
                round = round,
                "Verification record changed concurrently, re-reading"
            );
        }

        tracing::error!(
            email = %mask_email(email),
            event = "otp_contention",
            "Verification did not settle"
        );
        Err(DomainError::Internal {
            message: "Verification record kept changing during verification".to_string(),
        })
    }

    /// Look up the outstanding record for an email without mutating it
    pub async fn pending_verification(
        &self,
        email: &str,
    ) -> DomainResult<Option<PendingVerification>> {
        let now = self.clock.now();
        let record = self.repository.find_by_email(email).await?;
        Ok(record.map(|r| PendingVerification::from_record(&r, now, self.config.max_attempts)))
    }

    /// Delete every expired record, reporting storage failures
    pub async fn try_sweep_expired(&self) -> DomainResult<u64> {
        let deleted = self.repository.delete_expired(self.clock.now()).await?;
        if deleted > 0 {
            tracing::info!(
                deleted = deleted,
                event = "otp_sweep",
                "Removed expired verification records"
            );
        }
        Ok(deleted)
    }

    /// Delete every expired record
    ///
    /// Best-effort: failures are logged and reported as zero deletions.
    pub async fn sweep_expired(&self) -> u64 {
        match self.try_sweep_expired().await {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event = "otp_sweep_failed",
                    "Failed to sweep expired verification records"
                );
                0
            }
        }
    }
}
