//! Catalog of launchable ("installed") apps.

pub mod errors;
pub mod service;
pub mod types;

pub use errors::CatalogError;
pub use service::{AppCatalog, StaticAppCatalog};
pub use types::{AppCategory, AppDescriptor};
