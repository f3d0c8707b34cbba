//! MySQL implementation of the VerificationRepository trait.
//!
//! One row per email in `email_verifications`. The two conditional writes
//! used by verification are guarded by their WHERE clauses, so concurrent
//! requests for the same email are serialized by InnoDB row locks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error, info};

use crm_core::domain::entities::VerificationRecord;
use crm_core::errors::DomainError;
use crm_core::repositories::VerificationRepository;
use crm_shared::utils::mask_email;

use crate::InfrastructureError;

/// DDL for the verification table
pub const CREATE_VERIFICATION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS email_verifications (
        email VARCHAR(320) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        code CHAR(6) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        expires_at DATETIME(6) NOT NULL,
        attempts INT UNSIGNED NOT NULL DEFAULT 0,
        created_at DATETIME(6) NOT NULL,
        PRIMARY KEY (email),
        INDEX idx_email_verifications_expires_at (expires_at)
    ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4
"#;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    /// Create a new MySQL verification repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the verification table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        sqlx::query(CREATE_VERIFICATION_TABLE)
            .execute(&self.pool)
            .await?;
        info!("Verification table ready");
        Ok(())
    }

    /// Convert database row to VerificationRecord entity
    fn row_to_record(row: &MySqlRow) -> Result<VerificationRecord, DomainError> {
        Ok(VerificationRecord {
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            attempts: row
                .try_get::<u32, _>("attempts")
                .map_err(|e| column_error("attempts", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

/// Log a query failure and convert it into a domain error
fn query_error<'a>(
    operation: &'static str,
    email: Option<&'a str>,
) -> impl FnOnce(sqlx::Error) -> DomainError + 'a {
    move |e| {
        match email {
            Some(email) => error!(
                email = %mask_email(email),
                error = %e,
                operation,
                "Verification query failed"
            ),
            None => error!(error = %e, operation, "Verification query failed"),
        }
        DomainError::Internal {
            message: format!("Failed to {}: {}", operation, e),
        }
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT email, code, expires_at, attempts, created_at
            FROM email_verifications
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("find verification record", Some(email)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        // created_at keeps the value from the first insert
        sqlx::query(
            r#"
            INSERT INTO email_verifications (email, code, expires_at, attempts, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                expires_at = VALUES(expires_at),
                attempts = VALUES(attempts)
            "#,
        )
        .bind(&record.email)
        .bind(&record.code)
        .bind(record.expires_at)
        .bind(record.attempts)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_error("store verification record", Some(record.email.as_str())))?;

        debug!(email = %mask_email(&record.email), "Stored verification record");
        Ok(())
    }

    async fn increment_attempts(
        &self,
        email: &str,
        observed_code: &str,
        max_attempts: u32,
    ) -> Result<Option<u32>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_error("begin attempt transaction", Some(email)))?;

        let updated = sqlx::query(
            r#"
            UPDATE email_verifications
            SET attempts = attempts + 1
            WHERE email = ? AND code = ? AND attempts < ?
            "#,
        )
        .bind(email)
        .bind(observed_code)
        .bind(max_attempts)
        .execute(&mut *tx)
        .await
        .map_err(query_error("increment attempts", Some(email)))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(query_error("roll back attempt transaction", Some(email)))?;
            return Ok(None);
        }

        // The row lock taken by the UPDATE is held until commit
        let attempts: u32 =
            sqlx::query_scalar("SELECT attempts FROM email_verifications WHERE email = ?")
                .bind(email)
                .fetch_one(&mut *tx)
                .await
                .map_err(query_error("read attempts", Some(email)))?;

        tx.commit()
            .await
            .map_err(query_error("commit attempt transaction", Some(email)))?;

        Ok(Some(attempts))
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        max_attempts: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM email_verifications
            WHERE email = ? AND code = ? AND attempts < ? AND expires_at > ?
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(max_attempts)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(query_error("consume verification record", Some(email)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM email_verifications WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(query_error("delete verification record", Some(email)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM email_verifications WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(query_error("delete expired verification records", None))?;

        Ok(result.rows_affected())
    }
}
