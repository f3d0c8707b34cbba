//! Unit tests for the verification cleanup service

use chrono::Duration;
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::repositories::{InMemoryVerificationRepository, VerificationRepository};
use crate::services::verification::{
    VerificationCleanupConfig, VerificationCleanupService, VerificationService,
    VerificationServiceConfig,
};

use super::mocks::{FailingRepository, MockEmailService};

#[tokio::test]
async fn test_run_cleanup_reports_deleted_records() {
    let repo = Arc::new(InMemoryVerificationRepository::new());
    let clock = ManualClock::new();
    let service = Arc::new(
        VerificationService::new(repo.clone(), Arc::new(MockEmailService::new(false)), VerificationServiceConfig::default())
            .with_clock(Arc::new(clock.clone())),
    );
    service.issue("a@x.com").await.unwrap();
    service.issue("b@x.com").await.unwrap();
    clock.advance(Duration::minutes(15));
    service.issue("c@x.com").await.unwrap();

    let cleanup = VerificationCleanupService::new(service, VerificationCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.expired_records_deleted, 2);
    assert!(repo.exists("c@x.com").await.unwrap());
}

#[tokio::test]
async fn test_run_cleanup_disabled_does_nothing() {
    let repo = Arc::new(InMemoryVerificationRepository::new());
    let clock = ManualClock::new();
    let service = Arc::new(
        VerificationService::new(repo.clone(), Arc::new(MockEmailService::new(false)), VerificationServiceConfig::default())
            .with_clock(Arc::new(clock.clone())),
    );
    service.issue("a@x.com").await.unwrap();
    clock.advance(Duration::minutes(15));

    let config = VerificationCleanupConfig { interval_seconds: 1, enabled: false };
    let cleanup = Arc::new(VerificationCleanupService::new(service, config));

    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.expired_records_deleted, 0);
    assert!(repo.exists("a@x.com").await.unwrap());
    assert!(cleanup.start_background_task().is_none());
}

#[tokio::test]
async fn test_run_cleanup_collects_errors() {
    let service = Arc::new(VerificationService::new(
        Arc::new(FailingRepository),
        Arc::new(MockEmailService::new(false)),
        VerificationServiceConfig::default(),
    ));
    let cleanup = VerificationCleanupService::new(service, VerificationCleanupConfig::default());

    let result = cleanup.run_cleanup().await.unwrap();
    assert!(!result.is_success());
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let repo = Arc::new(InMemoryVerificationRepository::new());
    let clock = ManualClock::new();
    let service = Arc::new(
        VerificationService::new(repo.clone(), Arc::new(MockEmailService::new(false)), VerificationServiceConfig::default())
            .with_clock(Arc::new(clock.clone())),
    );
    service.issue("a@x.com").await.unwrap();

    let config = VerificationCleanupConfig { interval_seconds: 60, enabled: true };
    let cleanup = Arc::new(VerificationCleanupService::new(service, config));
    let handle = cleanup.start_background_task().expect("cleanup enabled");

    // First tick fires immediately while the record is still live
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    assert!(repo.exists("a@x.com").await.unwrap());

    clock.advance(Duration::minutes(11));
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    assert!(!repo.exists("a@x.com").await.unwrap());

    handle.abort();
}
