//! Unit tests for email service creation

use crm_shared::config::{EmailConfig, EmailProvider};

use crate::email::create_email_service;

#[test]
fn test_create_mock_service() {
    let config = EmailConfig::default();

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "Mock");
    assert_eq!(service.app_name(), "CRM");
}

#[tokio::test]
async fn test_create_smtp_service() {
    let mut config = EmailConfig {
        provider: EmailProvider::Smtp,
        ..Default::default()
    };
    config.smtp.host = "smtp.example.com".to_string();

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "SMTP");
}

#[tokio::test]
async fn test_create_invalid_smtp_falls_back_to_mock() {
    let config = EmailConfig {
        provider: EmailProvider::Smtp,
        from_address: "not an address".to_string(),
        ..Default::default()
    };

    let service = create_email_service(&config);
    // Should fallback to mock
    assert_eq!(service.provider_name(), "Mock");
}
