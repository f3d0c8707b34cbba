//! Email verification (OTP) configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for one-time code issuance, verification and cleanup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of minutes before an issued code expires
    #[serde(default = "default_code_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Failed attempts allowed before the code is locked
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds between expired-record sweeps
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Whether the background sweep runs at all
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_code_expiration_minutes(),
            max_attempts: default_max_attempts(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            sweep_enabled: default_sweep_enabled(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply `OTP_*` variables on top of this config
    pub fn merge_env(mut self) -> Self {
        if let Some(minutes) = env::var("OTP_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.code_expiration_minutes = minutes;
        }
        if let Some(max) = env::var("OTP_MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()) {
            self.max_attempts = max;
        }
        if let Some(interval) = env::var("OTP_SWEEP_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.sweep_interval_seconds = interval;
        }
        if let Some(enabled) = env::var("OTP_SWEEP_ENABLED").ok().and_then(|v| v.parse().ok()) {
            self.sweep_enabled = enabled;
        }
        self
    }
}

fn default_code_expiration_minutes() -> i64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_sweep_interval_seconds() -> u64 {
    300
}

fn default_sweep_enabled() -> bool {
    true
}
