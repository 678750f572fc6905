//! Configuration file loading.

use super::app_config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("io error reading {}: {source}", path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`AppConfig`].
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
}

/// Locates and reads the configuration file.
pub struct ConfigLoader {
    default_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader using the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_path: AppConfig::default_config_path(),
        }
    }

    /// Creates a loader with a specific default file (useful for testing).
    #[must_use]
    pub fn with_default_path(path: PathBuf) -> Self {
        Self {
            default_path: Some(path),
        }
    }

    /// Loads the application configuration.
    ///
    /// An explicit `path_override` must exist. A missing default file yields
    /// defaults. A file that exists but does not parse is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = match (path_override, &self.default_path) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) if path.exists() => path.clone(),
            (None, _) => {
                debug!("No config file found, using defaults");
                return Ok(AppConfig::default());
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;

        let config = toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?;

        info!(path = %config_path.display(), "Loaded config file");
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
