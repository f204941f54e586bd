//! Launch flow: catalog lookup, (staggered) instance creation and the
//! follow-up action for each created instance.

pub mod errors;
pub mod service;
pub mod types;

pub use errors::LaunchError;
pub use service::InstanceLauncher;
pub use types::{LaunchAction, LaunchReport, LaunchRequest};
