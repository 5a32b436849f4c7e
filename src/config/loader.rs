//! Configuration loading logic
//!
//! Handles loading configuration from the root config file with built-in
//! defaults and environment variable overrides.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &PathBuf) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Validate configuration by loading and checking for errors
    ///
    /// This performs strict validation - it will fail on:
    /// - Invalid YAML syntax
    /// - Invalid value types
    /// - File read errors
    /// - Out-of-range settings
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load configuration")?;

        if config.discovery.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("discovery.timeoutSeconds must be at least 1"));
        }

        if config.logger.tail < 0 {
            return Err(anyhow::anyhow!(
                "logger.tail must not be negative, got {}",
                config.logger.tail
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // KUBETOPO_NAMESPACE override
        if let Ok(namespace) = std::env::var("KUBETOPO_NAMESPACE") {
            config.default_namespace = namespace;
        }

        config
    }
}
