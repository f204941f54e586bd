use super::types::{Instance, InstanceId};

/// Notifications published by the [`InstanceRegistry`](super::InstanceRegistry).
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    InstanceCreated(Instance),
    InstanceRemoved { id: InstanceId },
    /// Persisted instances were inserted at startup.
    InstancesRestored { count: usize },
    InstancesCleared { ids: Vec<InstanceId> },
    /// A flush failed; the in-memory state is still authoritative.
    PersistenceFailed { reason: String },
}
