use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

use super::errors::SettingsError;
use super::types::AppSettings;

/// Stores [`AppSettings`] as a JSON object under one key.
#[derive(Clone)]
pub struct SettingsPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SettingsPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Returns `None` when nothing was stored yet.
    pub fn load(&self) -> Result<Option<AppSettings>, SettingsError> {
        let raw = self.store.get(&self.key).map_err(|e| persistence("load", e))?;
        let Some(raw) = raw else {
            debug!("No stored settings under '{}'", self.key);
            return Ok(None);
        };
        let settings: AppSettings = serde_json::from_str(&raw).map_err(|e| {
            warn!("Failed to deserialize settings under '{}': {}", self.key, e);
            persistence("load", StorageError::Decode { key: self.key.clone(), source: e })
        })?;
        settings.validate()?;
        Ok(Some(settings))
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        let raw = serde_json::to_string(settings).map_err(|e| {
            persistence("save", StorageError::Encode { key: self.key.clone(), source: e })
        })?;
        self.store.set(&self.key, &raw).map_err(|e| persistence("save", e))?;
        debug!("Settings saved under '{}'", self.key);
        Ok(())
    }
}

fn persistence(operation: &str, source: StorageError) -> SettingsError {
    SettingsError::PersistenceError { operation: operation.to_string(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::types::SettingKey;
    use crate::storage::InMemoryKeyValueStore;

    #[test]
    fn test_load_missing_is_none() {
        let persistence = SettingsPersistence::new(Arc::new(InMemoryKeyValueStore::new()), "settings");
        assert_eq!(persistence.load().unwrap(), None);
    }

    #[test]
    fn test_save_writes_wire_object() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let persistence = SettingsPersistence::new(store.clone(), "settings");
        persistence.save(&AppSettings { dark_mode: true, ..AppSettings::default() }).unwrap();

        assert_eq!(
            store.get("settings").unwrap().as_deref(),
            Some("{\"darkMode\":true,\"autoScan\":true,\"maxInstances\":10}")
        );
        assert_eq!(persistence.load().unwrap().map(|s| s.dark_mode), Some(true));
    }

    #[test]
    fn test_load_malformed_is_persistence_error() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([("settings", "[1,2]")]));
        let persistence = SettingsPersistence::new(store, "settings");
        assert!(matches!(
            persistence.load(),
            Err(SettingsError::PersistenceError { operation, source: StorageError::Decode { .. } }) if operation == "load"
        ));
    }

    #[test]
    fn test_load_invalid_values_is_validation_error() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([("settings", "{\"maxInstances\":0}")]));
        let persistence = SettingsPersistence::new(store, "settings");
        assert!(matches!(
            persistence.load(),
            Err(SettingsError::ValidationError { key: SettingKey::MaxInstances, .. })
        ));
    }
}
