//! Unit tests for email module

mod create_service_tests;
mod mock_email_tests;
