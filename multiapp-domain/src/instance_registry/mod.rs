//! The instance registry: the set of live simulated app instances.
//!
//! [`InstanceRegistry`] assigns monotonic ids, keeps insertion order,
//! persists itself through [`InstancePersistence`] after every mutation and
//! publishes [`RegistryEvent`]s to subscribers.

pub mod errors;
pub mod events;
pub mod persistence;
pub mod registry;
pub mod types;

pub use errors::RegistryError;
pub use events::RegistryEvent;
pub use persistence::InstancePersistence;
pub use registry::{batch_member_name, InstanceRegistry, PersistenceStatus, ValidatedRequest};
pub use types::{Instance, InstanceId, LaunchMode};
