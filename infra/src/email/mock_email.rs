//! Mock email service for development
//!
//! Logs each message instead of delivering it. Verification codes appear in
//! the log so a developer can complete the flow locally.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::info;
use uuid::Uuid;

use crm_shared::utils::mask_email;

use crate::InfrastructureError;

use super::email_service::{EmailMessage, EmailService};

/// Email service that logs instead of sending
pub struct MockEmailService {
    app_name: String,
    message_count: AtomicUsize,
    simulate_failure: AtomicBool,
    last_message: Mutex<Option<(String, EmailMessage)>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::with_options(false)
    }

    /// Create a mock that fails every send when `simulate_failure` is set
    pub fn with_options(simulate_failure: bool) -> Self {
        Self {
            app_name: String::from("CRM"),
            message_count: AtomicUsize::new(0),
            simulate_failure: AtomicBool::new(simulate_failure),
            last_message: Mutex::new(None),
        }
    }

    pub fn with_app_name(mut self, app_name: &str) -> Self {
        self.app_name = app_name.to_string();
        self
    }

    pub fn set_simulate_failure(&self, simulate_failure: bool) {
        self.simulate_failure.store(simulate_failure, Ordering::SeqCst);
    }

    /// Number of messages accepted since creation or the last reset
    pub fn get_message_count(&self) -> usize {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Recipient and content of the most recent message
    pub fn last_message(&self) -> Option<(String, EmailMessage)> {
        self.last_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Email("Simulated email delivery failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        info!(
            to = %mask_email(to),
            subject = subject,
            message_id = %message_id,
            body = body,
            "[MOCK EMAIL] Message not delivered"
        );

        *self.last_message.lock().unwrap_or_else(PoisonError::into_inner) = Some((
            to.to_string(),
            EmailMessage {
                subject: subject.to_string(),
                body: body.to_string(),
            },
        ));
        self.message_count.fetch_add(1, Ordering::SeqCst);

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
