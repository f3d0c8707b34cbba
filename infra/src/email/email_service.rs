//! Email service trait and message templates

use async_trait::async_trait;

use crm_shared::utils::is_valid_email;

use crate::InfrastructureError;

/// Rendered email content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

/// Render the verification code email
pub fn verification_email(app_name: &str, code: &str, expires_in_minutes: i64) -> EmailMessage {
    let unit = if expires_in_minutes == 1 { "minute" } else { "minutes" };
    EmailMessage {
        subject: format!("Your {} verification code", app_name),
        body: format!(
            "Your {} verification code is: {}\n\n\
             The code expires in {} {} and can only be used once.\n\
             If you did not request it, you can ignore this email.\n",
            app_name, code, expires_in_minutes, unit
        ),
    }
}

/// Common interface for outbound email providers
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a plain-text email and return the provider message id
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Send a verification code email
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!("Invalid email address: {}", to)));
        }
        let message = verification_email(self.app_name(), code, expires_in_minutes);
        self.send_email(to, &message.subject, &message.body).await
    }

    /// Provider name for logs and diagnostics
    fn provider_name(&self) -> &str;

    /// Product name used in message templates
    fn app_name(&self) -> &str;

    /// Whether the provider is currently able to deliver
    async fn is_available(&self) -> bool {
        true
    }
}
