use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::catalog::AppCatalog;
use crate::instance_registry::{batch_member_name, Instance, InstanceId, InstanceRegistry, LaunchMode, RegistryError};
use crate::panels::PanelManager;
use crate::settings::SettingsService;

use super::errors::LaunchError;
use super::types::{LaunchAction, LaunchReport, LaunchRequest};

/// Turns launch requests into registry `create` calls.
///
/// Batches are staggered: one member per tick, `stagger` apart. The registry
/// lock is released between ticks, so other operations may interleave with a
/// running batch.
pub struct InstanceLauncher {
    catalog: Arc<dyn AppCatalog>,
    registry: Arc<Mutex<InstanceRegistry>>,
    panels: Arc<Mutex<PanelManager>>,
    settings: Arc<dyn SettingsService>,
    stagger: Duration,
}

impl InstanceLauncher {
    pub fn new(
        catalog: Arc<dyn AppCatalog>,
        registry: Arc<Mutex<InstanceRegistry>>,
        panels: Arc<Mutex<PanelManager>>,
        settings: Arc<dyn SettingsService>,
        stagger: Duration,
    ) -> Self {
        Self { catalog, registry, panels, settings, stagger }
    }

    pub fn registry(&self) -> Arc<Mutex<InstanceRegistry>> {
        Arc::clone(&self.registry)
    }

    pub fn panels(&self) -> Arc<Mutex<PanelManager>> {
        Arc::clone(&self.panels)
    }

    /// Launches `request.count` instances of the requested app.
    ///
    /// Setting `cancel` to `true` stops the batch before its next member;
    /// instances created so far are kept.
    pub async fn launch(
        &self,
        request: LaunchRequest,
        mut cancel: Option<watch::Receiver<bool>>,
    ) -> Result<LaunchReport, LaunchError> {
        let app = self
            .catalog
            .find(&request.package_id)
            .await
            .ok_or_else(|| LaunchError::UnknownApp(request.package_id.clone()))?;

        let base_name = request
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| app.name.clone());
        let web_url = request
            .web_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| app.web_url.clone());

        if request.count == 0 {
            return Err(RegistryError::Validation("batch count must be at least 1".to_string()).into());
        }
        InstanceRegistry::validate_request(app.package_id.value(), &base_name, web_url.as_deref(), request.mode)?;

        info!("Launching {} x '{}' ({})", request.count, base_name, request.mode);
        let mut report = LaunchReport {
            instances: Vec::with_capacity(request.count),
            actions: Vec::with_capacity(request.count),
            cancelled: false,
            over_advisory_limit: false,
        };

        for index in 1..=request.count {
            let cancelled = if index == 1 {
                is_cancelled(&cancel)
            } else {
                self.wait_for_next_tick(&mut cancel).await
            };
            if cancelled {
                info!("Launch of '{}' cancelled after {} instance(s)", base_name, report.instances.len());
                report.cancelled = true;
                break;
            }

            let display_name = if request.count == 1 {
                base_name.clone()
            } else {
                batch_member_name(&base_name, index)
            };
            let instance = self.registry.lock().await.create(
                app.package_id.value(),
                &display_name,
                web_url.as_deref(),
                request.mode,
            )?;
            let action = self.present(&instance).await?;
            debug!("Instance {} launched with {:?}", instance.id(), action);

            report.instances.push(instance);
            report.actions.push(action);
        }

        let max_instances = self.settings.current().await.max_instances;
        let live = self.registry.lock().await.count();
        if live > max_instances as usize {
            warn!("{} live instances exceed the advisory limit of {}", live, max_instances);
            report.over_advisory_limit = true;
        }
        Ok(report)
    }

    async fn present(&self, instance: &Instance) -> Result<LaunchAction, LaunchError> {
        Ok(match instance.mode() {
            LaunchMode::Native => LaunchAction::None,
            LaunchMode::Web => match instance.web_url() {
                Some(url) => LaunchAction::OpenExternal { url: url.to_string() },
                None => LaunchAction::None,
            },
            LaunchMode::EmbeddedWebView => LaunchAction::OpenPanel {
                panel_id: self.panels.lock().await.open_for_instance(instance)?,
            },
        })
    }

    /// Sleeps one stagger interval. Returns `true` when cancelled meanwhile.
    async fn wait_for_next_tick(&self, cancel: &mut Option<watch::Receiver<bool>>) -> bool {
        let deadline = Instant::now() + self.stagger;
        let Some(receiver) = cancel else {
            sleep_until(deadline).await;
            return false;
        };
        loop {
            if *receiver.borrow() {
                return true;
            }
            tokio::select! {
                _ = sleep_until(deadline) => return *receiver.borrow(),
                changed = receiver.changed() => {
                    if changed.is_err() {
                        // Sender gone: nobody can cancel any more.
                        sleep_until(deadline).await;
                        return *receiver.borrow();
                    }
                }
            }
        }
    }

    /// Removes an instance together with its panel.
    pub async fn close_instance(&self, id: InstanceId) -> bool {
        let removed = self.registry.lock().await.remove(id);
        if removed {
            self.panels.lock().await.close_for_instance(id);
        }
        removed
    }
}

fn is_cancelled(cancel: &Option<watch::Receiver<bool>>) -> bool {
    cancel.as_ref().map_or(false, |receiver| *receiver.borrow())
}
