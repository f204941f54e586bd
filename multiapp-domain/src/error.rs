//! Error module for the multiapp domain layer.
//!
//! Every service has its own error enum; [`DomainError`] wraps them for
//! callers that drive several services at once.

use thiserror::Error;

use multiapp_core::CoreError;

use crate::catalog::CatalogError;
use crate::instance_registry::RegistryError;
use crate::launcher::LaunchError;
use crate::panels::PanelError;
use crate::settings::SettingsError;
use crate::storage::StorageError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}
