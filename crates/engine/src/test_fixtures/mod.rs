//! Common test helpers: scripted generators and failing storage.

pub mod generation_mocks;

pub use generation_mocks::{DelayedGenerator, PendingGenerator, ScriptedGenerator};

use crate::infrastructure::ports::{StorageError, StoragePort};

/// Storage where every operation fails, as if the disk were gone.
pub struct FailingStorage;

impl StoragePort for FailingStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::unavailable("load", "storage offline"))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::unavailable("save", "quota exceeded"))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::unavailable("remove", "storage offline"))
    }
}
