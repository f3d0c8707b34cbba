//! # CRM Core
//!
//! Core business logic and domain layer for the CRM email verification backend.
//! This crate contains the verification record entity, the one-time code state
//! machine, repository and notification interfaces, and error types that form
//! the foundation of the application architecture.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::entities::{VerificationRecord, VerificationState};
pub use errors::{DomainError, DomainResult, VerificationError};
pub use repositories::{InMemoryVerificationRepository, VerificationRepository};
pub use services::{
    CleanupResult, EmailServiceTrait, IssuedCode, PendingVerification, SendCodeResult,
    VerificationCleanupConfig, VerificationCleanupService, VerificationService,
    VerificationServiceConfig,
};
