//! Configuration-file loading for the watch daemon.

use std::path::Path;

use site_watch::WatchConfig;
use validator::Validate;

/// Errors that make a watch run impossible to start
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for a watch config
    #[error("Could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but holds unusable values
    #[error("Invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Load and validate a watch config from a JSON file.
pub fn load_config(path: &Path) -> Result<WatchConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config: WatchConfig = serde_json::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}
