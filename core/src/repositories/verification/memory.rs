//! In-memory implementation of VerificationRepository
//!
//! Used for development, single-process deployments and tests. Every
//! conditional write runs under one write lock, which gives the same
//! atomicity a single SQL statement gives the MySQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

use super::r#trait::VerificationRepository;

/// Process-local verification store
#[derive(Clone, Default)]
pub struct InMemoryVerificationRepository {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
}

impl InMemoryVerificationRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(&record.email) {
            Some(existing) => {
                existing.code = record.code.clone();
                existing.expires_at = record.expires_at;
                existing.attempts = record.attempts;
            }
            None => {
                records.insert(record.email.clone(), record.clone());
            }
        }
        Ok(())
    }

    async fn increment_attempts(
        &self,
        email: &str,
        observed_code: &str,
        max_attempts: u32,
    ) -> Result<Option<u32>, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(email) {
            Some(record) if record.code == observed_code && record.attempts < max_attempts => {
                record.attempts += 1;
                Ok(Some(record.attempts))
            }
            _ => Ok(None),
        }
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        max_attempts: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        let consumable = records.get(email).map_or(false, |record| {
            record.code == code && record.attempts < max_attempts && record.expires_at > now
        });
        if consumable {
            records.remove(email);
        }
        Ok(consumable)
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(email).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at > now);
        Ok((before - records.len()) as u64)
    }
}
