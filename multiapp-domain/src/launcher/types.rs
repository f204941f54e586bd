use serde::{Deserialize, Serialize};

use crate::instance_registry::{Instance, LaunchMode};
use crate::panels::PanelId;

/// What the user asked for: which app, how, and how many copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub package_id: String,
    /// Defaults to the app name from the catalog.
    #[serde(default)]
    pub display_name: Option<String>,
    pub mode: LaunchMode,
    pub count: usize,
    /// Overrides the catalog's URL.
    #[serde(default)]
    pub web_url: Option<String>,
}

impl LaunchRequest {
    pub fn single(package_id: impl Into<String>, mode: LaunchMode) -> Self {
        Self {
            package_id: package_id.into(),
            display_name: None,
            mode,
            count: 1,
            web_url: None,
        }
    }

    pub fn batch(package_id: impl Into<String>, mode: LaunchMode, count: usize) -> Self {
        Self { count, ..Self::single(package_id, mode) }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = Some(url.into());
        self
    }
}

/// What the presentation side has to do for a freshly created instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    None,
    OpenExternal { url: String },
    OpenPanel { panel_id: PanelId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchReport {
    pub instances: Vec<Instance>,
    /// One entry per element of `instances`, same order.
    pub actions: Vec<LaunchAction>,
    /// Remaining members were skipped because the launch was cancelled.
    pub cancelled: bool,
    /// The live instance count exceeds the advisory `maxInstances` setting.
    pub over_advisory_limit: bool,
}
