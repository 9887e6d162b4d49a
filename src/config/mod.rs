// Configuration management module
// Handles the TOML configuration file and its validation

pub mod settings;

pub use settings::{Config, ConfigError, ServerConfig, WeatherConfig};

/// Get the configuration directory path
#[inline]
pub fn get_config_dir() -> Result<std::path::PathBuf, ConfigError> {
    Config::config_dir()
}
