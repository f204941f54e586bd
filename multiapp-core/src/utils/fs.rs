//! Filesystem helpers.
//!
//! Thin wrappers over `std::fs` that map failures to
//! [`CoreError::Filesystem`] with the offending path attached.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Ensures that a directory exists at `path`, creating parents as needed.
///
/// Fails if the path exists but is not a directory.
///
/// # Examples
///
/// ```no_run
/// # use multiapp_core::utils::fs::ensure_dir_exists;
/// # use tempfile::tempdir;
/// let temp_dir = tempdir().unwrap();
/// let dir_path = temp_dir.path().join("store");
/// ensure_dir_exists(&dir_path).unwrap();
/// assert!(dir_path.is_dir());
/// ```
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if !path.is_dir() {
            Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "Path exists but is not a directory",
                ),
            })
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Reads the entire contents of a file into a string.
pub fn read_to_string(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| CoreError::Filesystem {
        message: "Failed to read file to string".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes `content` to `path`, creating or truncating the file.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<(), CoreError> {
    fs::write(path, content).map_err(|e| CoreError::Filesystem {
        message: "Failed to write string to file".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Renames `from` to `to`, replacing `to` if it exists.
pub fn rename_file(from: &Path, to: &Path) -> Result<(), CoreError> {
    fs::rename(from, to).map_err(|e| CoreError::Filesystem {
        message: format!("Failed to rename file to {:?}", to),
        path: from.to_path_buf(),
        source: e,
    })
}

/// Writes `content` next to `path` and renames it into place.
///
/// Readers never observe a half-written file. The parent directory is
/// created when missing.
pub fn write_string_atomically(path: &Path, content: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    write_string_to_file(&tmp_path, content)?;
    rename_file(&tmp_path, path)
}
