use thiserror::Error;

use crate::instance_registry::{InstanceId, LaunchMode};

use super::types::PanelId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("Panel not found: {0}")]
    NotFound(PanelId),

    #[error("Instance {instance_id} uses mode '{mode}', which has no panel")]
    UnsupportedMode { instance_id: InstanceId, mode: LaunchMode },

    #[error("Instance {0} has no web URL to show")]
    MissingUrl(InstanceId),

    #[error("{0} is not being dragged")]
    NotDragging(PanelId),
}
