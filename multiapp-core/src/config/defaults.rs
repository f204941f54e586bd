//! Default configuration values.
//!
//! These functions back the `#[serde(default = "...")]` attributes of the
//! configuration structs and their `Default` impls.

use super::types::LoggingConfig;
use std::path::PathBuf;

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None // console only
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_store_file_path() -> Option<PathBuf> {
    None
}

/// File name of the store inside the data directory when no path is configured.
pub const DEFAULT_STORE_FILE_NAME: &str = "store.json";

pub(crate) fn default_instances_key() -> String {
    "multiAppInstances".to_string()
}

pub(crate) fn default_settings_key() -> String {
    "multiAppSettings".to_string()
}

pub(crate) fn default_stagger_ms() -> u64 {
    300
}

pub(crate) fn default_scan_delay_ms() -> u64 {
    1000
}

pub(crate) fn default_event_capacity() -> usize {
    64
}

pub(crate) fn default_viewport_width() -> i32 {
    1280
}

pub(crate) fn default_viewport_height() -> i32 {
    800
}

/// Phone-sized panel.
pub(crate) fn default_panel_width() -> i32 {
    375
}

pub(crate) fn default_panel_height() -> i32 {
    667
}

pub(crate) fn default_panel_min_width() -> i32 {
    200
}

pub(crate) fn default_panel_min_height() -> i32 {
    240
}

pub(crate) fn default_cascade_offset() -> i32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging_config_values() {
        let lc = default_logging_config();
        assert_eq!(lc.level, "info");
        assert_eq!(lc.file_path, None);
        assert_eq!(lc.format, "text");
    }

    #[test]
    fn test_default_keys_are_distinct() {
        assert_ne!(default_instances_key(), default_settings_key());
    }

    #[test]
    fn test_default_panel_fits_viewport() {
        assert!(default_panel_width() <= default_viewport_width());
        assert!(default_panel_height() <= default_viewport_height());
        assert!(default_panel_min_width() <= default_panel_width());
        assert!(default_panel_min_height() <= default_panel_height());
    }
}
