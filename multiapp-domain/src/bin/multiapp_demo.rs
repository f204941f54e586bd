//! Command-line walk through the launcher.
//!
//! ```text
//! multiapp-demo [PACKAGE_ID] [COUNT] [MODE]
//! ```
//!
//! Loads `config.toml`, restores the persisted registry and settings, scans
//! the catalog, launches `COUNT` instances of `PACKAGE_ID` (default: three
//! embedded WhatsApp instances) and prints the resulting registry.

use anyhow::{Context, Result};
use tracing::{info, warn};

use multiapp_core::config::ConfigLoader;
use multiapp_core::logging;
use multiapp_domain::{AppCatalog, LaunchAction, LaunchMode, LaunchRequest, SettingsService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            logging::init_minimal_logging();
            return Err(e).context("Failed to load configuration");
        }
    };
    logging::init_logging(&config.logging, false).context("Failed to initialize logging")?;

    let mut args = std::env::args().skip(1);
    let package_id = args.next().unwrap_or_else(|| "com.whatsapp".to_string());
    let count: usize = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("COUNT must be a number, got '{}'", raw))?,
        None => 3,
    };
    let mode: LaunchMode = match args.next() {
        Some(raw) => raw.parse()?,
        None => LaunchMode::EmbeddedWebView,
    };

    let services = multiapp_domain::initialize(&config)
        .await
        .context("Failed to initialize domain services")?;

    let settings = services.settings.current().await;
    if settings.auto_scan {
        let apps = services.catalog.scan_installed_apps().await?;
        for app in &apps {
            println!("  {:<12} {:<30} {}", app.name, app.package_id.value(), app.category);
        }
    } else {
        info!("autoScan is off, skipping the app scan");
    }

    let report = services
        .launcher
        .launch(LaunchRequest::batch(package_id, mode, count), None)
        .await?;
    if report.over_advisory_limit {
        warn!("More than {} instances are running", settings.max_instances);
    }
    for (instance, action) in report.instances.iter().zip(&report.actions) {
        match action {
            LaunchAction::None => println!("launched #{} {}", instance.id(), instance.display_name()),
            LaunchAction::OpenExternal { url } => {
                println!("launched #{} {} -> open {}", instance.id(), instance.display_name(), url)
            }
            LaunchAction::OpenPanel { panel_id } => {
                println!("launched #{} {} in {}", instance.id(), instance.display_name(), panel_id)
            }
        }
    }

    let registry = services.registry.lock().await;
    println!("{} instance(s) in the registry:", registry.count());
    println!("{}", serde_json::to_string_pretty(&registry.serialize())?);
    Ok(())
}
