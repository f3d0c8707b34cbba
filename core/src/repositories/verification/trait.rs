//! Verification repository trait defining the interface for one-time code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

/// Repository trait for VerificationRecord persistence operations
///
/// Records are keyed by email and there is at most one per email.
///
/// # Concurrency
/// `increment_attempts` and `consume` are conditional writes: each must check
/// its condition and mutate in one atomic step (a single statement, a
/// transaction, or one critical section). Callers never read-modify-write
/// the attempt counter themselves.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Find the record for an email
    ///
    /// # Returns
    /// * `Ok(Some(VerificationRecord))` - Record found
    /// * `Ok(None)` - No outstanding code for the email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>, DomainError>;

    /// Insert the record, or overwrite code, expiry and attempts of the existing one
    ///
    /// The stored `created_at` of an existing row is kept.
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use crm_core::repositories::VerificationRepository;
    /// # use crm_core::domain::entities::VerificationRecord;
    /// # async fn example(repo: &impl VerificationRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = VerificationRecord::new("a@x.com".to_string(), 10, Utc::now());
    /// repo.upsert(&record).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError>;

    /// Record one failed attempt
    ///
    /// Increments `attempts` only if the stored row still carries
    /// `observed_code` and its attempts are below `max_attempts`.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - The new attempt count
    /// * `Ok(None)` - The condition no longer holds (row gone, reissued or locked)
    /// * `Err(DomainError)` - Storage error occurred
    async fn increment_attempts(
        &self,
        email: &str,
        observed_code: &str,
        max_attempts: u32,
    ) -> Result<Option<u32>, DomainError>;

    /// Delete the record if `code` still verifies at `now`
    ///
    /// The row is removed only when the code matches, attempts are below
    /// `max_attempts` and `expires_at` is after `now`.
    ///
    /// # Returns
    /// * `Ok(true)` - The record was consumed by this call
    /// * `Ok(false)` - The condition no longer holds
    /// * `Err(DomainError)` - Storage error occurred
    async fn consume(
        &self,
        email: &str,
        code: &str,
        max_attempts: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Delete the record for an email unconditionally
    ///
    /// # Returns
    /// * `Ok(true)` - Record deleted
    /// * `Ok(false)` - No record existed
    async fn delete(&self, email: &str) -> Result<bool, DomainError>;

    /// Delete every record whose `expires_at` is at or before `now`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Check whether an email has an outstanding record
    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
