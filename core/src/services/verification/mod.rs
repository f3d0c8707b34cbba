//! Verification service module for email-based one-time codes
//!
//! This module provides the verification code workflow:
//! - Code generation and storage (one record per email)
//! - Delivery through an injected email sender
//! - Verification with expiry and attempt tracking
//! - Periodic cleanup of expired records

mod cleanup;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, VerificationCleanupConfig, VerificationCleanupService};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::EmailServiceTrait;
pub use types::{IssuedCode, PendingVerification, SendCodeResult};
