//! Shared utilities and common types for the CRM server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Email address utilities (validation, normalization, masking)
//! - API response envelope

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment, LoggingConfig, ServerConfig,
    StorageBackend, VerificationConfig,
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::email;
