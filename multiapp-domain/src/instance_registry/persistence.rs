use std::sync::Arc;

use tracing::debug;

use crate::storage::{KeyValueStore, StorageError};

use super::types::Instance;

/// Reads and writes the instance list under a single store key.
#[derive(Clone)]
pub struct InstancePersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl InstancePersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted instances in stored order. A missing key yields
    /// an empty list.
    pub fn load(&self) -> Result<Vec<Instance>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!("No persisted instances under '{}'", self.key);
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Decode {
            key: self.key.clone(),
            source: e,
        })
    }

    pub fn save(&self, instances: &[Instance]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(instances).map_err(|e| StorageError::Encode {
            key: self.key.clone(),
            source: e,
        })?;
        self.store.set(&self.key, &raw)
    }
}

impl std::fmt::Debug for InstancePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstancePersistence").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance_registry::types::LaunchMode;
    use crate::storage::InMemoryKeyValueStore;
    use multiapp_core::types::PackageId;

    #[test]
    fn test_load_missing_key_is_empty() {
        let persistence = InstancePersistence::new(Arc::new(InMemoryKeyValueStore::new()), "instances");
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let persistence = InstancePersistence::new(store.clone(), "instances");
        let instances = vec![
            Instance::new(9, PackageId::new("b").unwrap(), "B".into(), None, LaunchMode::Native),
            Instance::new(2, PackageId::new("a").unwrap(), "A".into(), Some("https://a".into()), LaunchMode::Web),
        ];
        persistence.save(&instances).unwrap();

        assert!(store.get("instances").unwrap().unwrap().starts_with("[{\"id\":9"));
        assert_eq!(persistence.load().unwrap(), instances);
    }

    #[test]
    fn test_load_malformed_is_decode_error() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([("instances", "{\"id\": 1}")]));
        let persistence = InstancePersistence::new(store, "instances");
        assert!(matches!(persistence.load(), Err(StorageError::Decode { key, .. }) if key == "instances"));
    }
}
