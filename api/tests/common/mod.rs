//! Shared helpers for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use crm_api::AppState;
use crm_core::{InMemoryVerificationRepository, ManualClock, VerificationService, VerificationServiceConfig};
use crm_infra::email::{EmailServiceAdapter, MockEmailService};

pub type TestState = AppState<InMemoryVerificationRepository, EmailServiceAdapter>;

pub const MAX_PAYLOAD: usize = 16 * 1024;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub repository: Arc<InMemoryVerificationRepository>,
    pub mailer: Arc<MockEmailService>,
    pub clock: ManualClock,
}

pub fn context() -> TestContext {
    context_with_mailer(MockEmailService::new())
}

pub fn context_with_mailer(mailer: MockEmailService) -> TestContext {
    let repository = Arc::new(InMemoryVerificationRepository::new());
    let mailer = Arc::new(mailer);
    let clock = ManualClock::new();

    let service = VerificationService::new(
        repository.clone(),
        Arc::new(EmailServiceAdapter::new(mailer.clone())),
        VerificationServiceConfig::default(),
    )
    .with_clock(Arc::new(clock.clone()));

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(service))),
        repository,
        mailer,
        clock,
    }
}

/// A code that differs from `code`
pub fn wrong_code(code: &str) -> String {
    if code == "000000" { "111111".to_string() } else { "000000".to_string() }
}
