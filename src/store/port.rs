use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::SentinelError;

/// Persistence seam for the scan history.
///
/// A single named key holds one serialized value; a write replaces the whole
/// value. This keeps the scan store testable without a real storage backend.
pub trait StoragePort: Send + Sync {
    /// Returns the last value written under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, SentinelError>;

    /// Replaces the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), SentinelError>;
}

/// In-memory adapter. Ephemeral; used by tests and as the default when no
/// data directory is configured.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SentinelError> {
        let slots = self.slots.lock().unwrap();
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SentinelError> {
        let mut slots = self.slots.lock().unwrap();
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
