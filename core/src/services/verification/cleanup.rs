//! Verification cleanup service for periodic removal of expired records

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crm_shared::config::VerificationConfig;

use crate::errors::DomainError;
use crate::repositories::VerificationRepository;

use super::service::VerificationService;
use super::traits::EmailServiceTrait;

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct VerificationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for VerificationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300, // Run every five minutes
            enabled: true,
        }
    }
}

impl From<&VerificationConfig> for VerificationCleanupConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            enabled: config.sweep_enabled,
        }
    }
}

/// Service that sweeps expired verification records on a schedule
pub struct VerificationCleanupService<R, N>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    verification: Arc<VerificationService<R, N>>,
    config: VerificationCleanupConfig,
}

impl<R, N> VerificationCleanupService<R, N>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    /// Create a new cleanup service
    pub fn new(
        verification: Arc<VerificationService<R, N>>,
        config: VerificationCleanupConfig,
    ) -> Self {
        Self { verification, config }
    }

    /// Run a single cleanup cycle
    ///
    /// A storage failure is recorded in the result, never returned as `Err`.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.verification.try_sweep_expired().await {
            Ok(count) => {
                result.expired_records_deleted = count;
            }
            Err(e) => {
                error!("Failed to cleanup expired verification records: {}", e);
                result.errors.push(format!("Verification cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Verification cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Verification cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired verification records deleted
    pub expired_records_deleted: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
