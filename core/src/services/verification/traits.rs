//! Trait for email delivery integration

use async_trait::async_trait;

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to an email address
    ///
    /// `expires_in_minutes` is the code lifetime quoted to the recipient.
    /// Returns the provider message id. Failures are not retried.
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;
}
