//! Email delivery configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver through an SMTP relay
    Smtp,
    /// Log messages instead of sending them
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" | "log" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,

    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Login user name
    #[serde(default)]
    pub username: String,

    /// Login password
    #[serde(default)]
    pub password: String,

    /// Use STARTTLS when talking to the relay
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// Per-message timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            use_tls: default_use_tls(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider
    #[serde(default = "default_provider")]
    pub provider: EmailProvider,

    /// SMTP settings, used when `provider` is `smtp`
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Product name used in message subjects and bodies
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            smtp: SmtpConfig::default(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            app_name: default_app_name(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply `EMAIL_*` / `SMTP_*` / `APP_NAME` variables on top of this config
    pub fn merge_env(mut self) -> Self {
        if let Some(provider) = env::var("EMAIL_PROVIDER").ok().and_then(|v| v.parse().ok()) {
            self.provider = provider;
        }
        if let Ok(host) = env::var("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = env::var("SMTP_PORT").ok().and_then(|v| v.parse().ok()) {
            self.smtp.port = port;
        }
        if let Ok(username) = env::var("SMTP_USERNAME") {
            self.smtp.username = username;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            self.smtp.password = password;
        }
        if let Some(use_tls) = env::var("SMTP_USE_TLS").ok().and_then(|v| v.parse().ok()) {
            self.smtp.use_tls = use_tls;
        }
        if let Ok(from) = env::var("EMAIL_FROM_ADDRESS") {
            self.from_address = from;
        }
        if let Ok(name) = env::var("EMAIL_FROM_NAME") {
            self.from_name = name;
        }
        if let Ok(app_name) = env::var("APP_NAME") {
            self.app_name = app_name;
        }
        self
    }
}

fn default_provider() -> EmailProvider {
    EmailProvider::Mock
}

fn default_smtp_port() -> u16 {
    587
}

fn default_use_tls() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_from_address() -> String {
    String::from("no-reply@crm.local")
}

fn default_from_name() -> String {
    String::from("CRM")
}

fn default_app_name() -> String {
    String::from("CRM")
}
