use std::path::{Path, PathBuf};

use crate::errors::SentinelError;
use super::port::StoragePort;

/// File-backed storage adapter: one JSON file per key under a data directory.
///
/// This is the production analogue of a browser profile's key-value slot —
/// the history survives restarts but carries no durability guarantee beyond
/// a whole-file rewrite. Concurrent writers from separate processes race
/// and the last writer wins.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SentinelError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SentinelError> {
        let path = self.slot_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SentinelError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SentinelError> {
        let path = self.slot_path(key);
        std::fs::write(&path, value).map_err(|e| {
            SentinelError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
