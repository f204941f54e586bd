use thiserror::Error;

use crate::storage::StorageError;

use super::types::SettingKey;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Invalid value type for setting '{key}'. Expected type: {expected_type}, actual value preview: '{actual_value_preview}'")]
    InvalidValueType {
        key: SettingKey,
        expected_type: String,
        actual_value_preview: String,
    },

    #[error("Validation error for setting '{key}': {reason}")]
    ValidationError { key: SettingKey, reason: String },

    #[error("Persistence error during operation '{operation}'")]
    PersistenceError {
        operation: String,
        #[source]
        source: StorageError,
    },
}
