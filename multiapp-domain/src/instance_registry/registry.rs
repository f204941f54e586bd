use std::collections::HashMap;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use multiapp_core::types::PackageId;
use multiapp_core::CoreError;

use super::errors::RegistryError;
use super::events::RegistryEvent;
use super::persistence::InstancePersistence;
use super::types::{Instance, InstanceId, LaunchMode};

/// Whether the last flush reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceStatus {
    Healthy,
    /// The last write failed; only the in-memory state is current.
    Degraded,
}

/// Display name of the `index`-th (1-based) member of a batch.
pub fn batch_member_name(base_name: &str, index: usize) -> String {
    format!("{} #{}", base_name, index)
}

/// A validated `create` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub package_id: PackageId,
    pub web_url: Option<String>,
    pub mode: LaunchMode,
}

/// Sole authority over the live instances and id assignment.
///
/// All operations are synchronous. Every mutation is followed by a flush to
/// the store; a failed flush never undoes the mutation.
pub struct InstanceRegistry {
    instances: HashMap<InstanceId, Instance>,
    ordered_ids: Vec<InstanceId>,
    next_id: InstanceId,
    persistence: InstancePersistence,
    persistence_status: PersistenceStatus,
    event_publisher: broadcast::Sender<RegistryEvent>,
}

impl InstanceRegistry {
    /// Creates an empty registry. `event_capacity` must be greater than zero.
    pub fn new(persistence: InstancePersistence, event_capacity: usize) -> Self {
        let (event_publisher, _) = broadcast::channel(event_capacity.max(1));
        Self {
            instances: HashMap::new(),
            ordered_ids: Vec::new(),
            next_id: 1,
            persistence,
            persistence_status: PersistenceStatus::Healthy,
            event_publisher,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_publisher.subscribe()
    }

    /// Checks the arguments of a `create` call without touching the registry.
    ///
    /// An empty `web_url` counts as absent.
    pub fn validate_request(
        package_id: &str,
        display_name: &str,
        web_url: Option<&str>,
        mode: LaunchMode,
    ) -> Result<ValidatedRequest, RegistryError> {
        let package_id = PackageId::new(package_id).map_err(|e| match e {
            CoreError::InvalidInput(msg) => RegistryError::Validation(msg),
            other => RegistryError::Validation(other.to_string()),
        })?;
        if display_name.trim().is_empty() {
            return Err(RegistryError::Validation("display name cannot be empty".to_string()));
        }
        let web_url = web_url.filter(|url| !url.trim().is_empty()).map(str::to_string);
        if mode.requires_web_url() && web_url.is_none() {
            return Err(RegistryError::Validation(format!(
                "a web URL is required for mode '{}'",
                mode
            )));
        }
        Ok(ValidatedRequest { package_id, web_url, mode })
    }

    /// Creates, stores and announces a new instance.
    pub fn create(
        &mut self,
        package_id: &str,
        display_name: &str,
        web_url: Option<&str>,
        mode: LaunchMode,
    ) -> Result<Instance, RegistryError> {
        let request = Self::validate_request(package_id, display_name, web_url, mode)?;
        self.insert_new(request, display_name.to_string())
    }

    /// Creates `count` instances named `"{base_name} #1"` to `"{base_name} #{count}"`.
    ///
    /// Arguments are validated once, before the first creation. Each member
    /// is flushed on its own. If the id space runs out midway, the members
    /// created so far stay and the error is returned.
    pub fn create_batch(
        &mut self,
        package_id: &str,
        base_name: &str,
        web_url: Option<&str>,
        mode: LaunchMode,
        count: usize,
    ) -> Result<Vec<Instance>, RegistryError> {
        if count == 0 {
            return Err(RegistryError::Validation("batch count must be at least 1".to_string()));
        }
        let request = Self::validate_request(package_id, base_name, web_url, mode)?;
        (1..=count)
            .map(|index| self.insert_new(request.clone(), batch_member_name(base_name, index)))
            .collect()
    }

    fn insert_new(&mut self, request: ValidatedRequest, display_name: String) -> Result<Instance, RegistryError> {
        let id = self.next_id;
        // `next_id` must stay strictly above every assigned id.
        self.next_id = id.checked_add(1).ok_or(RegistryError::IdsExhausted)?;

        let instance = Instance::new(id, request.package_id, display_name, request.web_url, request.mode);
        self.instances.insert(id, instance.clone());
        self.ordered_ids.push(id);
        debug!("Created instance {} ('{}', {})", id, instance.display_name(), instance.mode());

        let _ = self.event_publisher.send(RegistryEvent::InstanceCreated(instance.clone()));
        self.persist();
        Ok(instance)
    }

    /// Removes the instance with `id`. Returns `false` when there is none.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        if self.instances.remove(&id).is_none() {
            return false;
        }
        self.ordered_ids.retain(|existing| *existing != id);
        debug!("Removed instance {}", id);

        let _ = self.event_publisher.send(RegistryEvent::InstanceRemoved { id });
        self.persist();
        true
    }

    /// Removes every instance. Ids handed out so far are not reused.
    pub fn clear(&mut self) -> usize {
        let ids = std::mem::take(&mut self.ordered_ids);
        self.instances.clear();
        info!("Cleared {} instance(s)", ids.len());

        let count = ids.len();
        let _ = self.event_publisher.send(RegistryEvent::InstancesCleared { ids });
        self.persist();
        count
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Instance> + '_ {
        self.ordered_ids.iter().filter_map(|id| self.instances.get(id))
    }

    /// All instances in insertion order.
    pub fn list(&self) -> Vec<Instance> {
        self.iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> InstanceId {
        self.next_id
    }

    pub fn persistence_status(&self) -> PersistenceStatus {
        self.persistence_status
    }

    /// Snapshot for persistence, in insertion order. Feeding it to `restore`
    /// on a fresh registry reproduces this one.
    pub fn serialize(&self) -> Vec<Instance> {
        self.list()
    }

    /// Inserts persisted instances as-is and advances `next_id` past them.
    ///
    /// An id that is already present (in the registry or earlier in
    /// `persisted`) is skipped with a warning, and so is `InstanceId::MAX`,
    /// which would leave no id for the next `create`. Returns the number
    /// inserted.
    pub fn restore(&mut self, persisted: Vec<Instance>) -> usize {
        let mut restored = 0;
        for instance in persisted {
            let id = instance.id();
            if self.instances.contains_key(&id) {
                warn!("Skipping persisted instance with duplicate id {}", id);
                continue;
            }
            let Some(after) = id.checked_add(1) else {
                warn!("Skipping persisted instance with out-of-range id {}", id);
                continue;
            };
            self.next_id = self.next_id.max(after);
            self.instances.insert(id, instance);
            self.ordered_ids.push(id);
            restored += 1;
        }
        info!("Restored {} instance(s), next id is {}", restored, self.next_id);
        let _ = self.event_publisher.send(RegistryEvent::InstancesRestored { count: restored });
        restored
    }

    /// Reads the persisted instances from the store and restores them.
    ///
    /// On a read failure nothing is inserted and the error is returned;
    /// the registry stays usable.
    pub fn restore_from_store(&mut self) -> Result<usize, RegistryError> {
        match self.persistence.load() {
            Ok(persisted) => Ok(self.restore(persisted)),
            Err(e) => {
                error!("Failed to read persisted instances under '{}': {}", self.persistence.key(), e);
                Err(RegistryError::PersistenceRead(e))
            }
        }
    }

    /// Writes the current state to the store.
    pub fn flush(&mut self) -> Result<(), RegistryError> {
        match self.persistence.save(&self.serialize()) {
            Ok(()) => {
                if self.persistence_status == PersistenceStatus::Degraded {
                    info!("Instance persistence recovered");
                }
                self.persistence_status = PersistenceStatus::Healthy;
                Ok(())
            }
            Err(e) => {
                self.persistence_status = PersistenceStatus::Degraded;
                Err(RegistryError::PersistenceWrite(e))
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            let reason = match &e {
                RegistryError::PersistenceWrite(source) => source.to_string(),
                other => other.to_string(),
            };
            error!("Instance state kept in memory only: {}", reason);
            let _ = self.event_publisher.send(RegistryEvent::PersistenceFailed { reason });
        }
    }
}

impl std::fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("count", &self.count())
            .field("next_id", &self.next_id)
            .field("persistence", &self.persistence)
            .field("persistence_status", &self.persistence_status)
            .finish()
    }
}
