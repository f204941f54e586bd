//! Configuration management.
//!
//! - [`types`]: the schema ([`CoreConfig`] and its sections).
//! - [`defaults`]: default values used by serde and the `Default` impls.
//! - [`loader`]: [`ConfigLoader`], which reads `config.toml`, falls back to
//!   defaults when it is missing, and validates the result.
//!
//! # Examples
//!
//! ```rust,ignore
//! use multiapp_core::config::ConfigLoader;
//!
//! let config = ConfigLoader::load()?;
//! println!("Panels open at {}x{}", config.panels.default_width, config.panels.default_height);
//! ```

pub mod defaults;
pub mod types;
pub mod loader;

pub use types::{CoreConfig, LauncherConfig, LoggingConfig, PanelConfig, StorageBackend, StorageConfig};
pub use loader::{ConfigDirs, ConfigLoader, CONFIG_FILE_NAME};
