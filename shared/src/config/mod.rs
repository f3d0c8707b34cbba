//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Storage backend and MySQL pool configuration
//! - `email` - Outbound email delivery configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `verification` - OTP lifetime, attempt cap and sweep schedule

pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::{DatabaseConfig, StorageBackend};
pub use email::{EmailConfig, EmailProvider, SmtpConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Email verification configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    ///
    /// Development runs against the in-memory store and the log-only mailer
    /// so the server starts without any external services.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::memory(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/crm")
                .with_max_connections(50),
            verification: VerificationConfig::default(),
            email: EmailConfig {
                provider: EmailProvider::Smtp,
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Create configuration for staging: production services, staging logging
    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            logging: LoggingConfig::for_environment(Environment::Staging),
            ..Self::production()
        }
    }

    /// Preset for an environment
    pub fn preset(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
        }
    }

    /// Load configuration from environment
    ///
    /// Starts from the preset for the detected environment and then applies
    /// every section's own environment variables on top.
    pub fn from_env() -> Self {
        let mut config = Self::preset(Environment::from_env());

        config.server = config.server.merge_env();
        config.database = config.database.merge_env();
        config.verification = config.verification.merge_env();
        config.email = config.email.merge_env();
        config.logging = config.logging.merge_env();
        config
    }
}
