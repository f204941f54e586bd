use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::types::{AppSettings, SettingKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChangedEvent {
    pub key: SettingKey,
    pub new_value: JsonValue,
}

impl SettingChangedEvent {
    pub fn new(key: SettingKey, new_value: JsonValue) -> Self {
        Self { key, new_value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsLoadedEvent {
    pub settings: AppSettings,
}

impl SettingsLoadedEvent {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }
}
