//! Email Service Module
//!
//! This module provides email delivery for verification codes and other
//! notifications. It includes an SMTP provider and a mock implementation
//! for development.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all email providers
//! - **Mock Implementation**: Log output for development
//! - **SMTP Support**: Production delivery via lettre (STARTTLS)
//! - **Security**: Address masking in logs

use std::sync::Arc;

use crm_shared::config::{EmailConfig, EmailProvider};

pub mod adapter;
pub mod email_service;
pub mod mock_email;
pub mod smtp;

// Re-export commonly used types
pub use adapter::EmailServiceAdapter;
pub use email_service::{verification_email, EmailMessage, EmailService};
pub use mock_email::MockEmailService;
pub use smtp::SmtpEmailService;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// An SMTP provider that cannot be initialized falls back to the mock
/// service with a warning, so the server still starts.
pub fn create_email_service(config: &EmailConfig) -> Arc<dyn EmailService> {
    match config.provider {
        EmailProvider::Mock => Arc::new(MockEmailService::new().with_app_name(&config.app_name)),
        EmailProvider::Smtp => match SmtpEmailService::new(config) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP email service: {}", e);
                tracing::warn!("Falling back to mock email service");
                Arc::new(MockEmailService::new().with_app_name(&config.app_name))
            }
        },
    }
}
