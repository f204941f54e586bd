//! Configuration data structures for the multiapp workspace.
//!
//! These structs are populated by deserializing `config.toml`. Every field has
//! a default taken from [`super::defaults`], and unknown fields are rejected
//! via `#[serde(deny_unknown_fields)]`.

use serde::Deserialize;
use std::path::PathBuf;
use super::defaults;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use multiapp_core::config::LoggingConfig;
///
/// let log_config: LoggingConfig = toml::from_str(r#"
/// level = "debug"
/// format = "json"
/// "#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, None);
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Which key-value backend holds the persisted instances and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// A JSON file in the application data directory.
    #[default]
    File,
    /// Nothing survives the process.
    Memory,
}

/// Where and under which keys state is persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Store file for the `file` backend. `None` means `<data dir>/store.json`;
    /// relative paths are resolved against the data directory.
    #[serde(default = "defaults::default_store_file_path")]
    pub file_path: Option<PathBuf>,
    #[serde(default = "defaults::default_instances_key")]
    pub instances_key: String,
    #[serde(default = "defaults::default_settings_key")]
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            file_path: defaults::default_store_file_path(),
            instances_key: defaults::default_instances_key(),
            settings_key: defaults::default_settings_key(),
        }
    }
}

/// Timing of the launch flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherConfig {
    /// Delay between two members of a batch launch, in milliseconds.
    #[serde(default = "defaults::default_stagger_ms")]
    pub stagger_ms: u64,
    /// Artificial delay of the installed-apps scan, in milliseconds.
    #[serde(default = "defaults::default_scan_delay_ms")]
    pub scan_delay_ms: u64,
    /// Capacity of the registry and settings broadcast channels. Must be > 0.
    #[serde(default = "defaults::default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            stagger_ms: defaults::default_stagger_ms(),
            scan_delay_ms: defaults::default_scan_delay_ms(),
            event_capacity: defaults::default_event_capacity(),
        }
    }
}

/// Geometry of the floating web view panels, in logical pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    #[serde(default = "defaults::default_viewport_width")]
    pub viewport_width: i32,
    #[serde(default = "defaults::default_viewport_height")]
    pub viewport_height: i32,
    #[serde(default = "defaults::default_panel_width")]
    pub default_width: i32,
    #[serde(default = "defaults::default_panel_height")]
    pub default_height: i32,
    #[serde(default = "defaults::default_panel_min_width")]
    pub min_width: i32,
    #[serde(default = "defaults::default_panel_min_height")]
    pub min_height: i32,
    /// Offset applied to each newly opened panel relative to the previous one.
    #[serde(default = "defaults::default_cascade_offset")]
    pub cascade_offset: i32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            viewport_width: defaults::default_viewport_width(),
            viewport_height: defaults::default_viewport_height(),
            default_width: defaults::default_panel_width(),
            default_height: defaults::default_panel_height(),
            min_width: defaults::default_panel_min_width(),
            min_height: defaults::default_panel_min_height(),
            cascade_offset: defaults::default_cascade_offset(),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use multiapp_core::config::CoreConfig;
///
/// let loaded: CoreConfig = toml::from_str(r#"
/// [logging]
/// level = "warn"
///
/// [launcher]
/// stagger_ms = 150
/// "#).unwrap();
/// assert_eq!(loaded.logging.level, "warn");
/// assert_eq!(loaded.launcher.stagger_ms, 150);
/// assert_eq!(loaded.storage.instances_key, "multiAppInstances");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
    #[serde(default)]
    pub panels: PanelConfig,
}
