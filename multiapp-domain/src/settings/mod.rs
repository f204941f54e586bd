//! User settings of the launcher (`darkMode`, `autoScan`, `maxInstances`).

pub mod errors;
pub mod events;
pub mod persistence;
pub mod service;
pub mod types;

pub use errors::SettingsError;
pub use events::{SettingChangedEvent, SettingsLoadedEvent};
pub use persistence::SettingsPersistence;
pub use service::{DefaultSettingsService, SettingsService};
pub use types::{AppSettings, SettingKey};
