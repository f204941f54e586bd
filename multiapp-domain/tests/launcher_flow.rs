use std::time::Duration;

use multiapp_core::config::{ConfigDirs, ConfigLoader, CoreConfig};
use multiapp_domain::{
    initialize, AppCatalog, KeyValueStore, LaunchAction, LaunchMode, LaunchRequest, PersistenceStatus, RegistryEvent,
    SettingKey, SettingsService,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> CoreConfig {
    let dirs = ConfigDirs {
        data_dir: dir.path().join("data"),
        state_dir: dir.path().join("state"),
    };
    ConfigLoader::parse(
        r#"
        [launcher]
        stagger_ms = 200
        scan_delay_ms = 0
        "#,
        &dirs,
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn launches_persist_and_restore_across_restarts() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let first = initialize(&config).await.unwrap();
    let apps = first.catalog.scan_installed_apps().await.unwrap();
    assert!(apps.iter().any(|app| app.package_id.value() == "com.google.android.gm"));

    let mut events = first.registry.lock().await.subscribe();
    let report = first
        .launcher
        .launch(LaunchRequest::batch("com.google.android.gm", LaunchMode::Web, 3), None)
        .await
        .unwrap();
    assert_eq!(report.instances.len(), 3);
    assert!(report
        .actions
        .iter()
        .all(|action| action == &LaunchAction::OpenExternal { url: "https://mail.google.com".to_string() }));
    for expected_id in 1..=3 {
        match events.recv().await.unwrap() {
            RegistryEvent::InstanceCreated(instance) => assert_eq!(instance.id(), expected_id),
            other => panic!("unexpected event {:?}", other),
        }
    }

    assert!(first.launcher.close_instance(2).await);
    first.settings.update(SettingKey::DarkMode, json!(true)).await.unwrap();
    let before = first.registry.lock().await.serialize();
    drop(first);

    let store_file = dir.path().join("data/store.json");
    assert!(store_file.exists());

    let second = initialize(&config).await.unwrap();
    {
        let registry = second.registry.lock().await;
        assert_eq!(registry.list(), before);
        assert_eq!(registry.next_id(), 4);
        assert_eq!(registry.persistence_status(), PersistenceStatus::Healthy);
    }
    assert!(second.settings.current().await.dark_mode);

    let report = second
        .launcher
        .launch(LaunchRequest::single("com.whatsapp", LaunchMode::Native), None)
        .await
        .unwrap();
    assert_eq!(report.instances[0].id(), 4);
}

#[tokio::test]
async fn corrupted_instances_start_an_empty_registry() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let services = initialize(&config).await.unwrap();
    services.store.set(&config.storage.instances_key, "{\"broken\":").unwrap();
    services.store.set(&config.storage.settings_key, "{\"maxInstances\":4}").unwrap();
    drop(services);

    let services = initialize(&config).await.unwrap();
    assert_eq!(services.registry.lock().await.count(), 0);
    assert_eq!(services.settings.current().await.max_instances, 4);

    // The next write replaces the corrupted value.
    services
        .launcher
        .launch(LaunchRequest::single("com.Slack", LaunchMode::Native), None)
        .await
        .unwrap();
    let raw = services.store.get(&config.storage.instances_key).unwrap().unwrap();
    assert!(raw.starts_with("[{\"id\":1,"));
}

#[tokio::test]
async fn corrupted_store_file_recovers_on_next_write() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let store_file = dir.path().join("data/store.json");
    std::fs::create_dir_all(store_file.parent().unwrap()).unwrap();
    std::fs::write(&store_file, "\"garbage\"").unwrap();

    let services = initialize(&config).await.unwrap();
    assert_eq!(services.registry.lock().await.count(), 0);

    for _ in 0..3 {
        services
            .launcher
            .launch(LaunchRequest::single("com.whatsapp", LaunchMode::Native), None)
            .await
            .unwrap();
    }
    assert_eq!(services.registry.lock().await.persistence_status(), PersistenceStatus::Healthy);

    let content = std::fs::read_to_string(&store_file).unwrap();
    let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content).unwrap();
    let instances = entries[&config.storage.instances_key].as_str().unwrap();
    assert_eq!(serde_json::from_str::<Vec<serde_json::Value>>(instances).unwrap().len(), 3);
    assert!(dir.path().join("data/store.json.corrupt").exists());
}

#[tokio::test(start_paused = true)]
async fn embedded_batch_opens_cascaded_panels() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let services = initialize(&config).await.unwrap();

    let started = tokio::time::Instant::now();
    let report = services
        .launcher
        .launch(
            LaunchRequest::batch("org.telegram.messenger", LaunchMode::EmbeddedWebView, 2).with_display_name("Chat"),
            None,
        )
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));

    let panels = services.panels.lock().await.list();
    let titles: Vec<&str> = panels.iter().map(|panel| panel.title.as_str()).collect();
    assert_eq!(titles, vec!["Chat #1", "Chat #2"]);
    assert_eq!(panels[1].bounds.origin.x - panels[0].bounds.origin.x, config.panels.cascade_offset);
    assert_eq!(report.actions[1], LaunchAction::OpenPanel { panel_id: panels[1].id });
}
