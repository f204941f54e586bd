use thiserror::Error;

use multiapp_core::CoreError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The enumeration source failed.
    #[error("App scan failed: {0}")]
    ScanFailed(String),

    #[error("Invalid catalog entry '{name}'")]
    InvalidDescriptor {
        name: String,
        #[source]
        source: CoreError,
    },
}
