use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, merged when present
pub const PROJECT_CONFIG_PATH: &str = ".orgaudit/config.yaml";

/// Prefix of environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "ORGAUDIT_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name}: {value}. Must be positive")]
    NonPositiveRatio { name: &'static str, value: Decimal },

    #[error(
        "Invalid salary band: underpaid_ratio ({underpaid}) must be less than overpaid_ratio ({overpaid})"
    )]
    InvertedSalaryBand { underpaid: Decimal, overpaid: Decimal },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid delimiter {0:?}. Must not be whitespace or alphanumeric")]
    InvalidDelimiter(char),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .orgaudit/config.yaml (project config, optional)
    /// 3. `extra` file given on the command line (optional)
    /// 4. Environment variables (ORGAUDIT_* prefix, highest priority)
    pub fn load(extra: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG_PATH));

        if let Some(path) = extra {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without project file or env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let policy = &config.policy;

        if policy.overpaid_ratio <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveRatio {
                name: "overpaid_ratio",
                value: policy.overpaid_ratio,
            });
        }

        if policy.underpaid_ratio <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveRatio {
                name: "underpaid_ratio",
                value: policy.underpaid_ratio,
            });
        }

        // Overpaid and underpaid must stay mutually exclusive.
        if policy.underpaid_ratio >= policy.overpaid_ratio {
            return Err(ConfigError::InvertedSalaryBand {
                underpaid: policy.underpaid_ratio,
                overpaid: policy.overpaid_ratio,
            });
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let delimiter = config.input.delimiter;
        if (delimiter.is_whitespace() && delimiter != '\t') || delimiter.is_alphanumeric() {
            return Err(ConfigError::InvalidDelimiter(delimiter));
        }

        Ok(())
    }
}
