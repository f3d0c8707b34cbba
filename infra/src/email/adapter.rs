//! Email Service Trait Adapter
//!
//! Implements the core `EmailServiceTrait` on top of any infrastructure
//! `EmailService`, bridging the provider implementations with the domain.

use async_trait::async_trait;
use std::sync::Arc;

use crm_core::services::verification::EmailServiceTrait;

use super::email_service::EmailService;

/// Adapter that implements the core EmailServiceTrait for any provider
#[derive(Clone)]
pub struct EmailServiceAdapter {
    inner: Arc<dyn EmailService>,
}

impl EmailServiceAdapter {
    pub fn new(inner: Arc<dyn EmailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        self.inner
            .send_verification_code(email, code, expires_in_minutes)
            .await
            .map_err(|e| e.to_string())
    }
}
