//! Unit tests for mock email service

use crate::email::{verification_email, EmailService, MockEmailService};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_email_send_success() {
    let service = MockEmailService::new();
    let result = service.send_email("user@example.com", "Subject", "Body").await;

    let message_id = result.unwrap();
    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);
}

#[tokio::test]
async fn test_mock_email_invalid_address() {
    let service = MockEmailService::new();
    let result = service.send_verification_code("not-an-email", "123456", 10).await;

    match result {
        Err(InfrastructureError::Email(msg)) => assert!(msg.contains("Invalid email address")),
        other => panic!("Expected Email error, got {:?}", other),
    }
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_email_simulate_failure() {
    let service = MockEmailService::new();
    service.set_simulate_failure(true);

    let result = service.send_email("user@example.com", "Subject", "Body").await;
    assert!(result.is_err());
    assert!(!service.is_available().await);

    service.set_simulate_failure(false);
    assert!(service.is_available().await);
}

#[tokio::test]
async fn test_mock_email_verification_code() {
    let service = MockEmailService::with_options(false).with_app_name("Acme CRM");
    service.send_verification_code("user@example.com", "123456", 5).await.unwrap();

    let (to, message) = service.last_message().unwrap();
    assert_eq!(to, "user@example.com");
    assert_eq!(message.subject, "Your Acme CRM verification code");
    assert!(message.body.contains("123456"));
    assert!(message.body.contains("expires in 5 minutes"));
    assert!(!message.body.contains("shortly"));
}

#[test]
fn test_verification_email_states_lifetime() {
    let message = verification_email("CRM", "123456", 10);
    assert!(message.body.contains("The code expires in 10 minutes"));

    let message = verification_email("CRM", "123456", 1);
    assert!(message.body.contains("The code expires in 1 minute "));
}

#[tokio::test]
async fn test_mock_email_counter() {
    let service = MockEmailService::new();

    for i in 1..=3 {
        let _ = service.send_email("user@example.com", &format!("Message {}", i), "Body").await;
        assert_eq!(service.get_message_count(), i);
    }

    service.reset_counter();
    assert_eq!(service.get_message_count(), 0);
}
