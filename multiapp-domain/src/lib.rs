//! Domain layer of the multi-instance app launcher.
//!
//! - [`storage`]: the [`KeyValueStore`] seam and its in-memory and file backends.
//! - [`instance_registry`]: the authoritative set of simulated instances.
//! - [`settings`]: `darkMode` / `autoScan` / `maxInstances`.
//! - [`catalog`]: the apps that can be launched.
//! - [`panels`]: floating web view panels for `embeddedWebView` instances.
//! - [`launcher`]: turns launch requests into (staggered) registry calls.
//!
//! [`initialize`] wires everything from a [`CoreConfig`].

pub mod catalog;
pub mod error;
pub mod instance_registry;
pub mod launcher;
pub mod panels;
pub mod settings;
pub mod storage;

pub use catalog::{AppCatalog, AppCategory, AppDescriptor, CatalogError, StaticAppCatalog};
pub use error::{DomainError, DomainResult};
pub use instance_registry::{
    Instance, InstanceId, InstancePersistence, InstanceRegistry, LaunchMode, PersistenceStatus, RegistryError,
    RegistryEvent,
};
pub use launcher::{InstanceLauncher, LaunchAction, LaunchError, LaunchReport, LaunchRequest};
pub use panels::{Panel, PanelError, PanelId, PanelManager};
pub use settings::{AppSettings, DefaultSettingsService, SettingKey, SettingsError, SettingsPersistence, SettingsService};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};

use std::sync::Arc;
use std::time::Duration;

use multiapp_core::config::CoreConfig;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The wired domain services.
pub struct DomainServices {
    pub store: Arc<dyn KeyValueStore>,
    pub registry: Arc<Mutex<InstanceRegistry>>,
    pub panels: Arc<Mutex<PanelManager>>,
    pub settings: Arc<DefaultSettingsService>,
    pub catalog: Arc<StaticAppCatalog>,
    pub launcher: Arc<InstanceLauncher>,
}

/// Builds the services from `config` and restores persisted state.
///
/// Unreadable instances or settings are not fatal: the registry then starts
/// empty and settings fall back to defaults, with a warning logged.
pub async fn initialize(config: &CoreConfig) -> DomainResult<DomainServices> {
    let store = storage::open_store(&config.storage)?;
    let capacity = config.launcher.event_capacity;

    let mut registry = InstanceRegistry::new(
        InstancePersistence::new(Arc::clone(&store), config.storage.instances_key.clone()),
        capacity,
    );
    if let Err(e) = registry.restore_from_store() {
        warn!("Starting with an empty registry: {}", e);
    }

    let settings = Arc::new(DefaultSettingsService::new(
        SettingsPersistence::new(Arc::clone(&store), config.storage.settings_key.clone()),
        capacity,
    ));
    if let Err(e) = settings.load().await {
        warn!("Starting with default settings: {}", e);
    }

    let registry = Arc::new(Mutex::new(registry));
    let panels = Arc::new(Mutex::new(PanelManager::new(config.panels.clone())));
    let catalog = Arc::new(StaticAppCatalog::new(Duration::from_millis(config.launcher.scan_delay_ms)));
    let launcher = Arc::new(InstanceLauncher::new(
        catalog.clone(),
        Arc::clone(&registry),
        Arc::clone(&panels),
        settings.clone(),
        Duration::from_millis(config.launcher.stagger_ms),
    ));

    info!("Domain services initialized ({} restored instance(s))", registry.lock().await.count());
    Ok(DomainServices { store, registry, panels, settings, catalog, launcher })
}
