//! SMTP email service backed by lettre

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crm_shared::config::EmailConfig;
use crm_shared::utils::mask_email;

use crate::InfrastructureError;

use super::email_service::EmailService;

/// Email delivery through an SMTP relay
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    app_name: String,
}

impl SmtpEmailService {
    /// Build the transport from configuration
    ///
    /// No connection is opened here; the relay is contacted on first send.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let smtp = &config.smtp;

        if !smtp.use_tls {
            warn!("SMTP TLS is disabled - this is not recommended for production");
        }

        let mut builder = if smtp.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host).map_err(|e| {
                InfrastructureError::Config(format!("Invalid SMTP relay {}: {}", smtp.host, e))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        }
        .port(smtp.port)
        .timeout(Some(Duration::from_secs(smtp.timeout_secs)));

        if !smtp.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ));
        }

        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
            app_name: config.app_name.clone(),
        })
    }

    fn message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain())
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        let message_id = self.message_id();
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| {
                InfrastructureError::Email(format!("Failed to build email message: {}", e))
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Email(format!("SMTP delivery failed: {}", e)))?;

        debug!(to = %mask_email(to), message_id = %message_id, "Email delivered to SMTP relay");
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    async fn is_available(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(available) => available,
            Err(e) => {
                warn!(error = %e, "SMTP relay is not reachable");
                false
            }
        }
    }
}
