//! XDG base directories and application-specific paths.
//!
//! Resolved through `directories-next`. The application directories are
//! derived from the `QUALIFIER`/`ORGANIZATION`/`APPLICATION` triple below,
//! e.g. `~/.config/multiapp` and `~/.local/share/multiapp` on Linux.
//!
//! Every function returns [`CoreError::Config`] with
//! [`ConfigError::DirectoryUnavailable`] when no home directory is known.

use std::path::PathBuf;
use directories_next::{BaseDirs, ProjectDirs};
use crate::error::{CoreError, ConfigError};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Multiapp";
const APPLICATION: &str = "Multiapp";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the base directory for user state files (`$XDG_STATE_HOME`).
///
/// On Linux an unset `$XDG_STATE_HOME` falls back to `$HOME/.local/state`;
/// other platforms use the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "State Base".to_string()
        }))
}

/// Returns the application configuration directory, home of `config.toml`.
///
/// # Examples
/// ```
/// match multiapp_core::utils::paths::get_app_config_dir() {
///     Ok(path) => println!("App config directory: {}", path.display()),
///     Err(e) => eprintln!("Error getting app config dir: {}", e),
/// }
/// ```
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the application data directory, home of the default key-value store file.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Data").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Returns the application state directory, used for relative log file paths.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base_state| base_state.join(ORGANIZATION).join(APPLICATION))
}
