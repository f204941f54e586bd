//! Error handling for the multiapp core layer.
//!
//! This module defines the error types shared by every crate of the
//! workspace, built with `thiserror`. The main error type is [`CoreError`],
//! which wraps the more specific [`ConfigError`] and [`LoggingError`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use multiapp_core::error::CoreError;
//!
//! fn parse_count(raw: &str) -> Result<u32, CoreError> {
//!     raw.parse()
//!         .map_err(|_| CoreError::InvalidInput(format!("'{}' is not a count", raw)))
//! }
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the multiapp workspace.
///
/// Designed to be wrapped by the domain layer's own errors, so every variant
/// keeps its source chain intact.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while installing the global tracing subscriber.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem operations (creating directories, reading or writing files)
    /// that failed on a specific path.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// General I/O errors not tied to a known path.
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),

    /// Invalid input provided to a function or constructor.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Returns `true` when the error describes a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Filesystem { source, .. } => source.kind() == io::ErrorKind::NotFound,
            CoreError::Io(source) => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Parsed values are out of range or inconsistent.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (XDG config/data/state home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging initialization.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Setting the global subscriber failed, or the configuration was unusable.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// A log filter directive could not be parsed.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_core_error_config_variant() {
        let core_err = CoreError::Config(ConfigError::ValidationError("stagger is zero".to_string()));

        assert_eq!(
            format!("{}", core_err),
            "Configuration Error: Configuration validation failed: stagger is zero"
        );
        match core_err.source().unwrap().downcast_ref::<ConfigError>() {
            Some(ConfigError::ValidationError(msg)) => assert_eq!(msg, "stagger is zero"),
            _ => panic!("Incorrect source for CoreError::Config"),
        }
    }

    #[test]
    fn test_core_error_logging_variant() {
        let core_err: CoreError = LoggingError::InitializationFailure("already set".to_string()).into();
        assert_eq!(
            format!("{}", core_err),
            "Logging Error: Failed to initialize logging: already set"
        );
        assert!(core_err.source().is_some());
    }

    #[test]
    fn test_core_error_filesystem_variant() {
        let path = PathBuf::from("/tmp/store.json");
        let core_err = CoreError::Filesystem {
            message: "Failed to write store".to_string(),
            path: path.clone(),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            format!("{}", core_err),
            format!("Filesystem Error: Failed to write store (Path: {:?})", path)
        );
        assert_eq!(
            core_err.source().unwrap().downcast_ref::<IoError>().unwrap().kind(),
            ErrorKind::PermissionDenied
        );
        assert!(!core_err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        let fs_err = CoreError::Filesystem {
            message: "missing".to_string(),
            path: PathBuf::from("/nope"),
            source: IoError::new(ErrorKind::NotFound, "gone"),
        };
        assert!(fs_err.is_not_found());
        assert!(CoreError::Io(IoError::new(ErrorKind::NotFound, "gone")).is_not_found());
        assert!(!CoreError::InvalidInput("x".to_string()).is_not_found());
    }

    #[test]
    fn test_core_error_invalid_input() {
        assert_eq!(
            format!("{}", CoreError::InvalidInput("empty".to_string())),
            "Invalid Input: empty"
        );
    }

    #[test]
    fn test_config_error_parse_error_variant() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("this is not = = toml").unwrap_err();
        let toml_err_display = format!("{}", toml_err);
        let config_err = ConfigError::ParseError(toml_err);

        assert_eq!(
            format!("{}", config_err),
            format!("Failed to parse configuration file: {}", toml_err_display)
        );
        assert!(config_err.source().unwrap().is::<toml::de::Error>());
    }

    #[test]
    fn test_config_error_directory_unavailable_variant() {
        let config_err = ConfigError::DirectoryUnavailable { dir_type: "Data Base".to_string() };
        assert_eq!(format!("{}", config_err), "Could not determine base directory for Data Base");
        assert!(config_err.source().is_none());
    }

    #[test]
    fn test_logging_error_filter_variant() {
        let log_err = LoggingError::FilterError("bad directive".to_string());
        assert_eq!(format!("{}", log_err), "Failed to set log filter: bad directive");
        assert!(log_err.source().is_none());
    }
}
