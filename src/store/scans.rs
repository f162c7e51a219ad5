use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::models::{ScanPatch, ScanRecord};
use super::port::StoragePort;

/// Storage slot holding the serialized scan history.
const RECENT_SCANS_KEY: &str = "recent_scans";

/// Maximum number of records retained; older entries are evicted on insert.
pub const MAX_RECENT: usize = 10;

/// Ordered, size-bounded history of recent scans over an injected storage port.
///
/// The collection is held newest-first and rewritten whole on every mutation,
/// so callers never observe a partially written state from the same process.
/// Persistence failures are logged and swallowed: losing a history entry must
/// never crash a scan flow.
#[derive(Clone)]
pub struct ScanStore {
    storage: Arc<dyn StoragePort>,
    /// Serializes read-modify-write cycles: without it, two writers in this
    /// process could both read the old collection and the last persist would
    /// silently drop the other's record.
    write_lock: Arc<Mutex<()>>,
}

impl ScanStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Inserts `record` at the front of the history. A record with the same
    /// id is replaced rather than duplicated; the history is then truncated
    /// to the `MAX_RECENT` most recent entries.
    pub fn save(&self, record: ScanRecord) {
        let _guard = self.write_lock.lock().unwrap();
        let mut scans = self.get_all();
        scans.retain(|s| s.id != record.id);
        scans.insert(0, record);
        scans.truncate(MAX_RECENT);
        self.persist(&scans);
    }

    /// The full history, newest first. An absent or corrupt slot reads as
    /// empty; this never fails.
    pub fn get_all(&self) -> Vec<ScanRecord> {
        let raw = match self.storage.read(RECENT_SCANS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read scan history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(scans) => scans,
            Err(e) => {
                warn!("Corrupt scan history, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Linear search by id. Absence is a normal outcome, not an error.
    pub fn get_by_id(&self, id: &str) -> Option<ScanRecord> {
        self.get_all().into_iter().find(|s| s.id == id)
    }

    /// Merges `patch` into the record with the given id and persists the
    /// result. A no-op when the id is unknown.
    pub fn update(&self, id: &str, patch: &ScanPatch) {
        let _guard = self.write_lock.lock().unwrap();
        let mut scans = self.get_all();
        let Some(existing) = scans.iter_mut().find(|s| s.id == id) else {
            return;
        };
        *existing = existing.merged(patch);
        self.persist(&scans);
    }

    fn persist(&self, scans: &[ScanRecord]) {
        let raw = match serde_json::to_string(scans) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize scan history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(RECENT_SCANS_KEY, &raw) {
            warn!("Failed to persist scan history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScanStatus, Severity};
    use crate::store::port::MemoryStorage;

    fn store() -> ScanStore {
        ScanStore::new(Arc::new(MemoryStorage::new()))
    }

    fn record(id: &str) -> ScanRecord {
        ScanRecord::pending(id, "example.com", "nmap", ScanStatus::Queued)
    }

    #[test]
    fn test_save_and_get_all_newest_first() {
        let store = store();
        store.save(record("scan-1"));
        store.save(record("scan-2"));
        store.save(record("scan-3"));

        let all = store.get_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "scan-3");
        assert_eq!(all[2].id, "scan-1");
    }

    #[test]
    fn test_save_caps_history_length() {
        let store = store();
        for i in 0..15 {
            store.save(record(&format!("scan-{i}")));
        }

        let all = store.get_all();
        assert_eq!(all.len(), MAX_RECENT);
        assert_eq!(all[0].id, "scan-14");
        assert_eq!(all[MAX_RECENT - 1].id, "scan-5");
    }

    #[test]
    fn test_save_dedups_by_id() {
        let store = store();
        store.save(record("scan-1"));

        let mut updated = record("scan-1");
        updated.status = ScanStatus::Completed;
        store.save(updated);

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, ScanStatus::Completed);
    }

    #[test]
    fn test_get_by_id_found_and_missing() {
        let store = store();
        store.save(record("scan-1"));

        assert!(store.get_by_id("scan-1").is_some());
        assert!(store.get_by_id("scan-9").is_none());
    }

    #[test]
    fn test_get_all_empty_store() {
        assert!(store().get_all().is_empty());
    }

    #[test]
    fn test_get_all_corrupt_slot_reads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(RECENT_SCANS_KEY, "{not json").unwrap();

        let store = ScanStore::new(storage);
        assert!(store.get_all().is_empty());
        assert!(store.get_by_id("any").is_none());
    }

    #[test]
    fn test_update_merges_fields() {
        let store = store();
        store.save(record("scan-1"));

        store.update(
            "scan-1",
            &ScanPatch {
                status: Some(ScanStatus::Completed),
                findings_count: Some(2),
                severity: Some(Severity::High),
                ..Default::default()
            },
        );

        let updated = store.get_by_id("scan-1").unwrap();
        assert_eq!(updated.status, ScanStatus::Completed);
        assert_eq!(updated.findings_count, Some(2));
        assert_eq!(updated.severity, Some(Severity::High));
        assert_eq!(updated.target, "example.com");
        assert_eq!(updated.tool, "nmap");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = store();
        store.save(record("scan-1"));

        store.update("scan-404", &ScanPatch::status(ScanStatus::Failed));

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, ScanStatus::Queued);
    }

    #[test]
    fn test_save_survives_failing_storage() {
        struct BrokenStorage;
        impl StoragePort for BrokenStorage {
            fn read(&self, _key: &str) -> Result<Option<String>, crate::errors::SentinelError> {
                Err(crate::errors::SentinelError::Storage("quota exceeded".into()))
            }
            fn write(&self, _key: &str, _value: &str) -> Result<(), crate::errors::SentinelError> {
                Err(crate::errors::SentinelError::Storage("quota exceeded".into()))
            }
        }

        let store = ScanStore::new(Arc::new(BrokenStorage));
        store.save(record("scan-1"));
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_concurrent_saves_keep_both_records() {
        // A slow read widens the read-modify-write window; without the
        // internal lock one of the two saves reads the old collection and
        // overwrites the other.
        struct SlowReadStorage {
            inner: MemoryStorage,
        }
        impl StoragePort for SlowReadStorage {
            fn read(&self, key: &str) -> Result<Option<String>, crate::errors::SentinelError> {
                std::thread::sleep(std::time::Duration::from_millis(50));
                self.inner.read(key)
            }
            fn write(&self, key: &str, value: &str) -> Result<(), crate::errors::SentinelError> {
                self.inner.write(key, value)
            }
        }

        let store = ScanStore::new(Arc::new(SlowReadStorage {
            inner: MemoryStorage::new(),
        }));

        let other = store.clone();
        let writer = std::thread::spawn(move || other.save(record("scan-a")));
        store.save(record("scan-b"));
        writer.join().unwrap();

        let mut ids: Vec<String> = store.get_all().into_iter().map(|s| s.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["scan-a".to_string(), "scan-b".to_string()]);
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(crate::store::file::FileStorage::new(dir.path()).unwrap());

        let store = ScanStore::new(storage);
        store.save(record("scan-1"));
        drop(store);

        let reopened = ScanStore::new(Arc::new(
            crate::store::file::FileStorage::new(dir.path()).unwrap(),
        ));
        assert_eq!(reopened.get_by_id("scan-1").unwrap().target, "example.com");
    }
}
