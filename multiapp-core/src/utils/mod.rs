//! General utilities for the multiapp core.
//!
//! - [`fs`]: directory creation and (atomic) file reads/writes with
//!   `CoreError` mapping.
//! - [`paths`]: XDG and application-specific directories.

pub mod fs;
pub mod paths;

pub use fs::{ensure_dir_exists, read_to_string, rename_file, write_string_atomically, write_string_to_file};
