//! Database configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Which store backs the verification records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MySQL through a SQLx connection pool
    MySql,
    /// Process-local map, for development and tests
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(StorageBackend::MySql),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Storage backend selection
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Create the verification table on startup if it is missing
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,

    /// Slow query threshold in milliseconds
    #[serde(default = "default_slow_query_threshold")]
    pub slow_query_threshold: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: String::from("mysql://localhost:3306/crm"),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            auto_migrate: default_auto_migrate(),
            slow_query_threshold: default_slow_query_threshold(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply `DATABASE_*` / `STORAGE_BACKEND` variables on top of this config
    pub fn merge_env(mut self) -> Self {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.url = url;
            // An explicit URL implies the relational store unless overridden below
            self.backend = StorageBackend::MySql;
        }
        if let Some(backend) = env::var("STORAGE_BACKEND").ok().and_then(|v| v.parse().ok()) {
            self.backend = backend;
        }
        if let Some(max) = env::var("DATABASE_MAX_CONNECTIONS").ok().and_then(|v| v.parse().ok()) {
            self.max_connections = max;
        }
        if let Some(timeout) = env::var("DATABASE_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.connect_timeout = timeout;
        }
        if let Some(auto) = env::var("DATABASE_AUTO_MIGRATE").ok().and_then(|v| v.parse().ok()) {
            self.auto_migrate = auto;
        }
        self
    }

    /// Create a new MySQL database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Configuration for the in-memory store
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            url: String::new(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Check if this is a production database
    pub fn is_production(&self) -> bool {
        self.backend == StorageBackend::MySql
            && !self.url.contains("localhost")
            && !self.url.contains("127.0.0.1")
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::MySql
}

fn default_auto_migrate() -> bool {
    true
}

fn default_slow_query_threshold() -> u64 {
    1000 // 1 second
}
