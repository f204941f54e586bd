use thiserror::Error;

use crate::instance_registry::RegistryError;
use crate::panels::PanelError;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Unknown app: {0}")]
    UnknownApp(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Panel(#[from] PanelError),
}
