//! Configuration loading.
//!
//! [`ConfigLoader`] locates `config.toml`, deserializes it into a
//! [`CoreConfig`], falls back to defaults when the file is absent, and
//! validates the result.
//!
//! ```rust,ignore
//! use multiapp_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Logging level: {}", config.logging.level),
//!     Err(e) => {
//!         multiapp_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```
//!
//! ## Validation
//!
//! - log level and format are normalized to lowercase and checked;
//! - a relative log file path is resolved against the state directory;
//! - the store file path defaults to `<data dir>/store.json`, relative paths
//!   are resolved against the data directory;
//! - storage keys must be non-empty and distinct;
//! - the event capacity and every panel dimension must be positive, and the
//!   default panel size must sit between the minimum size and the viewport.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::DEFAULT_STORE_FILE_NAME;
use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::paths::{get_app_config_dir, get_app_data_dir, get_app_state_dir};

/// Name of the configuration file inside the application config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directories against which relative paths in the configuration are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDirs {
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl ConfigDirs {
    /// Resolves the XDG-derived application data and state directories.
    pub fn from_environment() -> Result<Self, CoreError> {
        Ok(Self {
            data_dir: get_app_data_dir()?,
            state_dir: get_app_state_dir()?,
        })
    }
}

/// Namespace for the configuration loading functions.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.toml` from the application config directory.
    ///
    /// A missing file yields the default configuration; read, parse and
    /// validation failures are returned as [`CoreError::Config`].
    pub fn load() -> Result<CoreConfig, CoreError> {
        let config_path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        let dirs = ConfigDirs::from_environment()?;
        Self::load_from_path(&config_path, &dirs)
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from_path(path: &Path, dirs: &ConfigDirs) -> Result<CoreConfig, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, dirs),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No configuration at {:?}, using defaults", path);
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config, dirs)?;
                Ok(config)
            }
            Err(e) => Err(CoreError::Config(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })),
        }
    }

    /// Parses TOML content and validates it. Blank content means defaults.
    pub fn parse(content: &str, dirs: &ConfigDirs) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?
        };
        Self::validate_config(&mut config, dirs)?;
        Ok(config)
    }

    /// Validates `config` in place, normalizing strings and resolving paths.
    pub fn validate_config(config: &mut CoreConfig, dirs: &ConfigDirs) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(validation(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                )));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(validation(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                )));
            }
        }

        if let Some(log_path) = &config.logging.file_path {
            if log_path.is_relative() {
                config.logging.file_path = Some(dirs.state_dir.join(log_path));
            }
        }

        config.storage.file_path = Some(match config.storage.file_path.take() {
            Some(path) if path.is_relative() => dirs.data_dir.join(path),
            Some(path) => path,
            None => dirs.data_dir.join(DEFAULT_STORE_FILE_NAME),
        });

        if config.storage.instances_key.trim().is_empty() || config.storage.settings_key.trim().is_empty() {
            return Err(validation("Storage keys must not be empty.".to_string()));
        }
        if config.storage.instances_key == config.storage.settings_key {
            return Err(validation(format!(
                "Instances and settings must use different storage keys (both are '{}').",
                config.storage.instances_key
            )));
        }

        if config.launcher.event_capacity == 0 {
            return Err(validation("launcher.event_capacity must be greater than 0.".to_string()));
        }

        let panels = &config.panels;
        let dimensions = [
            ("viewport_width", panels.viewport_width),
            ("viewport_height", panels.viewport_height),
            ("default_width", panels.default_width),
            ("default_height", panels.default_height),
            ("min_width", panels.min_width),
            ("min_height", panels.min_height),
        ];
        if let Some((name, value)) = dimensions.iter().find(|(_, value)| *value <= 0) {
            return Err(validation(format!("panels.{} must be positive, got {}.", name, value)));
        }
        if panels.cascade_offset < 0 {
            return Err(validation("panels.cascade_offset must not be negative.".to_string()));
        }
        if panels.min_width > panels.default_width || panels.default_width > panels.viewport_width {
            return Err(validation(
                "panels.default_width must lie between min_width and viewport_width.".to_string(),
            ));
        }
        if panels.min_height > panels.default_height || panels.default_height > panels.viewport_height {
            return Err(validation(
                "panels.default_height must lie between min_height and viewport_height.".to_string(),
            ));
        }

        Ok(())
    }
}

fn validation(message: String) -> CoreError {
    CoreError::Config(ConfigError::ValidationError(message))
}
