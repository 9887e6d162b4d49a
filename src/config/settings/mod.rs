
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::weather::Observation;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
}

impl Default for ServerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            name: "weather-server".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    /// Observation reported for locations missing from the lookup table
    pub fallback: Observation,
    /// Extra lookup-table entries layered over the built-in ones
    pub locations: BTreeMap<String, Observation>,
}

impl Default for WeatherConfig {
    #[inline]
    fn default() -> Self {
        Self {
            fallback: Observation {
                temperature: 22,
                condition: "clear".to_string(),
                humidity: 50,
            },
            locations: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid server name (cannot be empty)")]
    InvalidServerName,
    #[error("Invalid humidity for '{0}': {1} (must be between 0 and 100)")]
    InvalidHumidity(String, i64),
    #[error("Invalid condition for '{0}' (cannot be empty)")]
    InvalidCondition(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Config {
    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join("config.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        fs::create_dir_all(config_dir.as_ref()).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.as_ref().display()
            )
        })?;

        let config_path = config_dir.as_ref().join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.name.trim().is_empty() {
            return Err(ConfigError::InvalidServerName);
        }

        validate_observation("fallback", &self.weather.fallback)?;
        for (location, observation) in &self.weather.locations {
            validate_observation(location, observation)?;
        }

        Ok(())
    }

    /// Platform configuration directory for this application
    #[inline]
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("weather-mcp"))
            .ok_or(ConfigError::DirectoryError)
    }
}

fn validate_observation(location: &str, observation: &Observation) -> Result<(), ConfigError> {
    if !(0..=100).contains(&observation.humidity) {
        return Err(ConfigError::InvalidHumidity(
            location.to_string(),
            observation.humidity,
        ));
    }

    if observation.condition.trim().is_empty() {
        return Err(ConfigError::InvalidCondition(location.to_string()));
    }

    Ok(())
}
