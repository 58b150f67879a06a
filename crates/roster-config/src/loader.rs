//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use roster_core::RosterError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "ROSTER_ENVIRONMENT";

/// Prefix of environment variables overriding individual keys.
pub const ENV_PREFIX: &str = "ROSTER";

/// Validated configuration together with the environment it was loaded for.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables such as `ROSTER__SERVER__REST_PORT`
    ///
    /// The environment is read from `ROSTER_ENVIRONMENT` and defaults to
    /// `development`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, RosterError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::for_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn for_environment(
        config_dir: impl Into<PathBuf>,
        environment: impl Into<String>,
    ) -> Result<Self, RosterError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the environment this loader was created for.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn load_config(config_dir: &Path, environment: &str) -> Result<AppConfig, RosterError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_roster_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
