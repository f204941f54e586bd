use std::fmt;

use serde::{Deserialize, Serialize};

use multiapp_core::types::Rect;

use crate::instance_registry::InstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    pub const fn new(raw: u64) -> Self {
        PanelId(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// A floating panel hosting the web view of one `embeddedWebView` instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,
    pub instance_id: InstanceId,
    pub title: String,
    pub url: String,
    pub bounds: Rect,
    /// 1 for the bottom-most panel, `count()` for the top-most.
    pub z_index: u32,
    pub minimized: bool,
}
