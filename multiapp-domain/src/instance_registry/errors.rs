use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Invalid arguments to `create`/`create_batch`. Nothing was mutated.
    #[error("Invalid instance request: {0}")]
    Validation(String),

    /// Every instance id has been handed out. Nothing was mutated.
    #[error("No instance ids left to assign")]
    IdsExhausted,

    /// The persisted instances could not be read or decoded.
    #[error("Failed to read persisted instances")]
    PersistenceRead(#[source] StorageError),

    /// The in-memory state could not be written to the store.
    #[error("Failed to persist instances")]
    PersistenceWrite(#[source] StorageError),
}
