use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, warn};

use super::errors::SettingsError;
use super::events::{SettingChangedEvent, SettingsLoadedEvent};
use super::persistence::SettingsPersistence;
use super::types::{AppSettings, SettingKey};

// --- SettingsService Trait ---

#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Loads the stored settings. Missing settings yield the defaults; on a
    /// malformed or unreadable value the defaults are installed and the
    /// error is returned.
    async fn load(&self) -> Result<(), SettingsError>;
    async fn current(&self) -> AppSettings;
    async fn get(&self, key: SettingKey) -> JsonValue;
    /// Type-checks, validates and applies `value`, then persists. When only
    /// the write fails, the new value stays in effect and the error is returned.
    async fn update(&self, key: SettingKey, value: JsonValue) -> Result<(), SettingsError>;
    async fn reset_to_defaults(&self) -> Result<(), SettingsError>;
    fn subscribe(&self) -> broadcast::Receiver<SettingChangedEvent>;
    fn subscribe_to_settings_loaded(&self) -> broadcast::Receiver<SettingsLoadedEvent>;
}

// --- DefaultSettingsService Implementation ---

pub struct DefaultSettingsService {
    settings: RwLock<AppSettings>,
    persistence: SettingsPersistence,
    event_sender: broadcast::Sender<SettingChangedEvent>,
    loaded_event_sender: broadcast::Sender<SettingsLoadedEvent>,
}

impl DefaultSettingsService {
    pub fn new(persistence: SettingsPersistence, broadcast_capacity: usize) -> Self {
        let (event_sender, _) = broadcast::channel(broadcast_capacity.max(1));
        let (loaded_event_sender, _) = broadcast::channel(broadcast_capacity.max(1));
        Self {
            settings: RwLock::new(AppSettings::default()),
            persistence,
            event_sender,
            loaded_event_sender,
        }
    }

    fn value_of(settings: &AppSettings, key: SettingKey) -> JsonValue {
        match key {
            SettingKey::DarkMode => JsonValue::from(settings.dark_mode),
            SettingKey::AutoScan => JsonValue::from(settings.auto_scan),
            SettingKey::MaxInstances => JsonValue::from(settings.max_instances),
        }
    }

    fn publish_changes(&self, before: &AppSettings, after: &AppSettings) {
        for key in SettingKey::ALL {
            let new_value = Self::value_of(after, key);
            if Self::value_of(before, key) != new_value {
                if let Err(e) = self.event_sender.send(SettingChangedEvent::new(key, new_value)) {
                    debug!("No subscriber for SettingChangedEvent({}): {}", key, e);
                }
            }
        }
    }
}

#[async_trait]
impl SettingsService for DefaultSettingsService {
    async fn load(&self) -> Result<(), SettingsError> {
        let (loaded, outcome) = match self.persistence.load() {
            Ok(Some(settings)) => (settings, Ok(())),
            Ok(None) => (AppSettings::default(), Ok(())),
            Err(e) => {
                error!("Falling back to default settings: {}", e);
                (AppSettings::default(), Err(e))
            }
        };

        *self.settings.write().await = loaded.clone();
        debug!("Settings in effect: {:?}", loaded);

        if let Err(e) = self.loaded_event_sender.send(SettingsLoadedEvent::new(loaded)) {
            debug!("No subscriber for SettingsLoadedEvent: {}", e);
        }
        outcome
    }

    async fn current(&self) -> AppSettings {
        self.settings.read().await.clone()
    }

    async fn get(&self, key: SettingKey) -> JsonValue {
        Self::value_of(&*self.settings.read().await, key)
    }

    async fn update(&self, key: SettingKey, value: JsonValue) -> Result<(), SettingsError> {
        debug!("Updating setting {} to {}", key, value);

        macro_rules! update_field {
            ($target:expr, $field:ident, $expected_type:expr) => {
                match serde_json::from_value(value.clone()) {
                    Ok(val) => $target.$field = val,
                    Err(_) => {
                        return Err(SettingsError::InvalidValueType {
                            key,
                            expected_type: $expected_type.to_string(),
                            actual_value_preview: format!("{:.50}", value.to_string()),
                        })
                    }
                }
            };
        }

        let mut guard = self.settings.write().await;
        let mut new_settings = guard.clone();
        match key {
            SettingKey::DarkMode => update_field!(new_settings, dark_mode, "bool"),
            SettingKey::AutoScan => update_field!(new_settings, auto_scan, "bool"),
            SettingKey::MaxInstances => update_field!(new_settings, max_instances, "u32"),
        }
        new_settings.validate()?;

        let previous = std::mem::replace(&mut *guard, new_settings.clone());
        drop(guard);
        self.publish_changes(&previous, &new_settings);

        self.persistence.save(&new_settings).map_err(|e| {
            warn!("Setting {} applied but not persisted: {}", key, e);
            e
        })
    }

    async fn reset_to_defaults(&self) -> Result<(), SettingsError> {
        let defaults = AppSettings::default();
        let previous = std::mem::replace(&mut *self.settings.write().await, defaults.clone());
        self.publish_changes(&previous, &defaults);
        self.persistence.save(&defaults)
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingChangedEvent> {
        self.event_sender.subscribe()
    }

    fn subscribe_to_settings_loaded(&self) -> broadcast::Receiver<SettingsLoadedEvent> {
        self.loaded_event_sender.subscribe()
    }
}
