//! # Multiapp Core Library (`multiapp-core`)
//!
//! Foundation crate of the multi-instance app launcher. It carries what every
//! other crate in the workspace needs and nothing domain specific:
//!
//! - **Error Handling**: [`CoreError`] with the specific [`ConfigError`] and
//!   [`LoggingError`].
//! - **Core Data Types**: [`PackageId`] and the integer geometry
//!   ([`Point`], [`Size`], [`Rect`]) used to place panels.
//! - **Configuration**: [`CoreConfig`] loaded from `config.toml` by
//!   [`ConfigLoader`], with defaults and validation.
//! - **Logging**: `tracing` subscriber setup with console and rolling-file
//!   output in text or JSON.
//! - **Utilities**: filesystem helpers (`utils::fs`) and XDG paths
//!   (`utils::paths`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use multiapp_core::config::ConfigLoader;
//! use multiapp_core::logging::init_logging;
//! use multiapp_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!
//!     tracing::info!("Multiapp core initialized.");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod logging;
pub mod utils;

pub use error::{CoreError, ConfigError, LoggingError};
pub use types::{PackageId, Point, Rect, Size};
pub use config::{
    ConfigDirs, ConfigLoader, CoreConfig, LauncherConfig, LoggingConfig, PanelConfig, StorageBackend,
    StorageConfig,
};
pub use logging::{init_logging, init_minimal_logging};
pub use utils::{ensure_dir_exists, read_to_string, rename_file, write_string_atomically, write_string_to_file};
