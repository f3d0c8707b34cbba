//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the CRM backend,
//! following Clean Architecture principles. It provides concrete implementations
//! of the core interfaces for storage and email delivery.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool and verification repository using SQLx
//! - **Email**: SMTP delivery through lettre, plus a logging mock for development
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use crm_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - Outbound email providers
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
