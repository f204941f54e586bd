use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SettingsError;

/// User-facing options of the launcher.
///
/// Persisted as `{"darkMode":false,"autoScan":true,"maxInstances":10}`.
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub dark_mode: bool,
    /// Scan the catalog automatically at startup.
    pub auto_scan: bool,
    /// Advisory limit on live instances. Exceeding it is reported, never refused.
    pub max_instances: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            auto_scan: true,
            max_instances: 10,
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_instances == 0 {
            return Err(SettingsError::ValidationError {
                key: SettingKey::MaxInstances,
                reason: "maxInstances must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Addresses a single field of [`AppSettings`] by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    DarkMode,
    AutoScan,
    MaxInstances,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [SettingKey::DarkMode, SettingKey::AutoScan, SettingKey::MaxInstances];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::DarkMode => "darkMode",
            SettingKey::AutoScan => "autoScan",
            SettingKey::MaxInstances => "maxInstances",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}
