//! Durable key-value storage.
//!
//! [`KeyValueStore`] is the seam between the domain services and the place
//! their state lives. Two backends are provided: [`InMemoryKeyValueStore`]
//! and the JSON-file backed [`FileKeyValueStore`].

pub mod errors;
pub mod file_store;
pub mod kv_store;

pub use errors::StorageError;
pub use file_store::FileKeyValueStore;
pub use kv_store::{InMemoryKeyValueStore, KeyValueStore};

use std::sync::Arc;

use multiapp_core::config::{StorageBackend, StorageConfig};

/// Builds the backend selected by `config`.
///
/// The `file` backend requires a resolved `file_path`, which
/// `ConfigLoader::validate_config` always provides.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryKeyValueStore::new())),
        StorageBackend::File => {
            let path = config.file_path.clone().ok_or_else(|| {
                StorageError::Unavailable("no file path configured for the file backend".to_string())
            })?;
            Ok(Arc::new(FileKeyValueStore::new(path)))
        }
    }
}
