use std::path::PathBuf;
use thiserror::Error;

use multiapp_core::CoreError;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore) backend or by
/// the typed helpers that encode values for it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on key-value store {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("Key-value store {path:?} is corrupted")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize key-value store {path:?}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for key '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode value stored under key '{key}'")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Key-value store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_decode_error_keeps_source() {
        let json_err = serde_json::from_str::<Vec<u64>>("{").unwrap_err();
        let err = StorageError::Decode { key: "multiAppInstances".to_string(), source: json_err };
        assert_eq!(
            err.to_string(),
            "Failed to decode value stored under key 'multiAppInstances'"
        );
        assert!(err.source().unwrap().is::<serde_json::Error>());
    }

    #[test]
    fn test_unavailable_display() {
        let err = StorageError::Unavailable("lock poisoned".to_string());
        assert_eq!(err.to_string(), "Key-value store unavailable: lock poisoned");
    }
}
