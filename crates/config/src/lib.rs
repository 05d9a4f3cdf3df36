#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for the HAT mod loader
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/hat/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod priority;

pub use priority::PriorityList;

use hat_errors::{ConfigError, Error};
use hat_types::{name_key, ColorChoice, OutputFormat, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub mods: ModsConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub default_output: OutputFormat,
    #[serde(default)]
    pub color: ColorChoice,
}

/// Identity of the running loader, checked against each mod's reserved
/// dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_loader_name")]
    pub name: String,
    #[serde(default = "default_loader_version")]
    pub version: Version,
}

/// Mod discovery and selection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModsConfig {
    pub directory: Option<PathBuf>,
    pub priority_list: Option<PathBuf>,
    /// Mods excluded before resolution
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            name: default_loader_name(),
            version: default_loader_version(),
        }
    }
}

fn default_loader_name() -> String {
    constants::LOADER_NAME.to_string()
}

fn default_loader_version() -> Version {
    constants::LOADER_VERSION
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("hat").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // HAT_LOADER_VERSION
        if let Ok(version) = std::env::var("HAT_LOADER_VERSION") {
            self.loader.version =
                Version::parse(&version).map_err(|_| ConfigError::InvalidValue {
                    field: "HAT_LOADER_VERSION".to_string(),
                    value: version,
                })?;
        }

        // HAT_MODS_DIR
        if let Ok(dir) = std::env::var("HAT_MODS_DIR") {
            if dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "HAT_MODS_DIR".to_string(),
                    value: dir,
                }
                .into());
            }
            self.mods.directory = Some(PathBuf::from(dir));
        }

        // HAT_PRIORITY_LIST
        if let Ok(path) = std::env::var("HAT_PRIORITY_LIST") {
            self.mods.priority_list = Some(PathBuf::from(path));
        }

        // HAT_OUTPUT
        if let Ok(output) = std::env::var("HAT_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "HAT_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Get the mods directory (with default)
    #[must_use]
    pub fn mods_dir(&self) -> PathBuf {
        self.mods
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::MODS_DIR))
    }

    /// Get the priority list path (defaults to a file in the mods directory)
    #[must_use]
    pub fn priority_list_path(&self) -> PathBuf {
        self.mods
            .priority_list
            .clone()
            .unwrap_or_else(|| self.mods_dir().join(constants::PRIORITY_LIST_FILE))
    }

    /// Get the candidate manifest path
    #[must_use]
    pub fn candidates_path(&self) -> PathBuf {
        self.mods_dir().join(constants::CANDIDATES_FILE)
    }

    /// Folded names of disabled mods
    #[must_use]
    pub fn disabled_keys(&self) -> HashSet<String> {
        self.mods.disabled.iter().map(|name| name_key(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.loader.name, "HAT");
        assert_eq!(config.loader.version, Version::new(1, 1, 1, 0));
        assert_eq!(config.mods_dir(), PathBuf::from("Mods"));
        assert_eq!(
            config.priority_list_path(),
            PathBuf::from("Mods").join("priority.txt")
        );
    }

    #[test]
    fn test_disabled_keys_fold_case() {
        let mut config = Config::default();
        config.mods.disabled = vec!["FezMultiplayer".into(), "SPEEDRUN".into()];
        let keys = config.disabled_keys();
        assert!(keys.contains("fezmultiplayer"));
        assert!(keys.contains("speedrun"));
    }
}
