//! Floating web view panels for `embeddedWebView` instances.

pub mod errors;
pub mod manager;
pub mod types;

pub use errors::PanelError;
pub use manager::PanelManager;
pub use types::{Panel, PanelId};
