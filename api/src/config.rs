//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. the preset for the detected environment
//! 2. an optional `config.<environment>` file (TOML, YAML or JSON)
//! 3. `CRM__SECTION__KEY` environment variables
//! 4. the flat variables each section reads (`DATABASE_URL`, `SMTP_HOST`, ...)

use config::{Config, ConfigError, Environment as EnvSource, File};

use crm_shared::config::{AppConfig, Environment};

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "CRM";

/// Load the application configuration
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_env();
    load_config_for(environment)
}

/// Load the configuration for an explicit environment
pub fn load_config_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let preset = AppConfig::preset(environment);

    let layered: AppConfig = Config::builder()
        .add_source(Config::try_from(&preset)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(AppConfig {
        server: layered.server.merge_env(),
        database: layered.database.merge_env(),
        verification: layered.verification.merge_env(),
        email: layered.email.merge_env(),
        logging: layered.logging.merge_env(),
        ..layered
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_preset_loads() {
        let config = load_config_for(Environment::Development).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.verification.max_attempts > 0);
    }
}
