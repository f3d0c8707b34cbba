//! Domain-specific error types and error handling.

mod types;


// Re-export all error types and utilities
pub use types::{ErrorResponse, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    /// The code is stored but could not be handed to the notification sender
    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    // Bridge to the verification taxonomy
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// The verification failure reason, if this error is one
    pub fn verification_error(&self) -> Option<&VerificationError> {
        match self {
            DomainError::Verification(err) => Some(err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
