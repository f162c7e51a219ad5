use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::errors::SentinelError;
use crate::models::{ScanPatch, ScanRecord, ScanStatus};
use crate::scanner::ScanExecutor;
use crate::store::ScanStore;

/// Default delay between status polls for a non-terminal scan.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Resolves scan identifiers to displayable records and follows non-terminal
/// scans until they finish.
pub struct ScanViewer {
    store: ScanStore,
    executor: Arc<dyn ScanExecutor>,
    poll_interval: Duration,
}

/// A running poll loop. Dropping the handle does not stop the loop; call
/// [`WatchHandle::cancel`] to guarantee no further poll fires.
pub struct WatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<Result<Option<ScanRecord>, SentinelError>>,
}

impl WatchHandle {
    /// Stops the poll loop. No status query is issued after this returns.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this watch; usable after the handle is consumed
    /// by [`WatchHandle::wait`].
    pub fn canceller(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the loop to finish. `Ok(None)` means it was cancelled
    /// before observing a terminal status.
    pub async fn wait(self) -> Result<Option<ScanRecord>, SentinelError> {
        self.task
            .await
            .map_err(|e| SentinelError::Internal(format!("Watch task failed: {e}")))?
    }
}

impl ScanViewer {
    pub fn new(store: ScanStore, executor: Arc<dyn ScanExecutor>) -> Self {
        Self {
            store,
            executor,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Resolves `id` to a record: the local history first, then the
    /// collaborator. A stored completed record missing its result payload is
    /// backfilled from the collaborator and persisted.
    pub async fn resolve(&self, id: &str) -> Result<ScanRecord, SentinelError> {
        if let Some(record) = self.store.get_by_id(id) {
            if record.result.is_some() || !record.status.is_terminal() {
                return Ok(record);
            }
            if record.status == ScanStatus::Completed {
                let report = self.executor.get_job_results(id).await?;
                let patch = ScanPatch::finished(&report);
                let merged = record.merged(&patch);
                self.store.update(id, &patch);
                return Ok(merged);
            }
            return Ok(record);
        }

        // Unknown locally; the collaborator is the only remaining source.
        let job = self
            .executor
            .get_job_status(id)
            .await
            .map_err(|_| SentinelError::NotFound(format!("Scan not found: {id}")))?;

        if job.status == ScanStatus::Completed {
            let report = self.executor.get_job_results(id).await?;
            let (target, tool) = (report.target.clone(), report.tool.clone());
            return Ok(ScanRecord::completed(&target, &tool, report));
        }

        let mut record = ScanRecord::pending(&job.job_id, &job.target, &job.tool, job.status);
        record.progress = job.progress;
        Ok(record)
    }

    /// Polls a non-terminal scan at the configured interval, mirroring each
    /// observed status into the store, until the scan turns terminal or the
    /// handle is cancelled. A scan that is already terminal finishes without
    /// any poll.
    pub fn watch(&self, id: &str) -> WatchHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let store = self.store.clone();
        let executor = self.executor.clone();
        let interval = self.poll_interval;
        let id = id.to_string();

        let task = tokio::spawn(async move {
            if let Some(record) = store.get_by_id(&id) {
                if record.status.is_terminal() {
                    return Ok(Some(record));
                }
            }

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(id = %id, "Watch cancelled");
                        return Ok(None);
                    }
                    _ = tokio::time::sleep(interval) => {}
                }

                let job = match executor.get_job_status(&id).await {
                    Ok(job) => job,
                    Err(e) => {
                        // Transient collaborator failures leave the record
                        // as-is; the next tick retries.
                        warn!(id = %id, "Status poll failed: {}", e);
                        continue;
                    }
                };

                // A cancel that landed while the status query was in flight
                // must not reach the store or trigger a results fetch.
                if token.is_cancelled() {
                    debug!(id = %id, "Watch cancelled");
                    return Ok(None);
                }

                let mut patch = ScanPatch::status(job.status);
                patch.progress = job.progress;
                store.update(&id, &patch);

                match job.status {
                    ScanStatus::Completed => {
                        let report = executor.get_job_results(&id).await?;
                        store.update(&id, &ScanPatch::finished(&report));
                        return Ok(store.get_by_id(&id));
                    }
                    ScanStatus::Failed => {
                        let patch = ScanPatch {
                            status: Some(ScanStatus::Failed),
                            completed_at: Some(chrono::Utc::now()),
                            ..Default::default()
                        };
                        store.update(&id, &patch);
                        return Ok(store.get_by_id(&id));
                    }
                    _ => {}
                }
            }
        });

        WatchHandle { cancel, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::scanner::MockExecutor;
    use crate::store::MemoryStorage;

    fn viewer_with(executor: Arc<MockExecutor>, interval_ms: u64) -> (ScanViewer, ScanStore) {
        let store = ScanStore::new(Arc::new(MemoryStorage::new()));
        let viewer = ScanViewer::new(store.clone(), executor)
            .with_poll_interval(Duration::from_millis(interval_ms));
        (viewer, store)
    }

    fn pending(id: &str, status: ScanStatus) -> ScanRecord {
        ScanRecord::pending(id, "example.com", "nmap", status)
    }

    #[tokio::test]
    async fn test_resolve_prefers_stored_record() {
        let executor = Arc::new(MockExecutor::default());
        let (viewer, store) = viewer_with(executor.clone(), 10);
        store.save(pending("job-1", ScanStatus::Running));

        let record = viewer.resolve("job-1").await.unwrap();
        assert_eq!(record.id, "job-1");
        assert_eq!(executor.status_calls(), 0);
        assert_eq!(executor.results_calls(), 0);
    }

    #[tokio::test]
    async fn test_resolve_backfills_missing_result() {
        let executor = Arc::new(MockExecutor::default());
        let (viewer, store) = viewer_with(executor.clone(), 10);

        let mut record = pending("job-1", ScanStatus::Completed);
        record.completed_at = Some(chrono::Utc::now());
        store.save(record);

        let resolved = viewer.resolve("job-1").await.unwrap();
        assert!(resolved.result.is_some());
        assert_eq!(executor.results_calls(), 1);
        // Backfill is persisted.
        assert!(store.get_by_id("job-1").unwrap().result.is_some());
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_collaborator() {
        let executor = Arc::new(MockExecutor::instant(5));
        let (viewer, _) = viewer_with(executor.clone(), 10);

        let record = viewer.resolve("job-unknown").await.unwrap();
        assert_eq!(record.status, ScanStatus::Running);
        assert_eq!(executor.status_calls(), 1);
    }

    #[tokio::test]
    async fn test_watch_stops_on_terminal_status() {
        let executor = Arc::new(MockExecutor::instant(2));
        let (viewer, store) = viewer_with(executor.clone(), 10);
        store.save(pending("job-1", ScanStatus::Running));

        let handle = viewer.watch("job-1");
        let record = handle.wait().await.unwrap().unwrap();

        assert_eq!(record.status, ScanStatus::Completed);
        assert_eq!(record.findings_count, Some(2));
        assert_eq!(record.severity, Some(Severity::High));
        assert!(record.result.is_some());

        // Terminal status observed on the third poll; no further polls fire.
        let polls = executor.status_calls();
        assert_eq!(polls, 3);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(executor.status_calls(), polls);
    }

    #[tokio::test]
    async fn test_watch_already_terminal_never_polls() {
        let executor = Arc::new(MockExecutor::default());
        let (viewer, store) = viewer_with(executor.clone(), 10);

        let mut record = pending("job-1", ScanStatus::Failed);
        record.completed_at = Some(chrono::Utc::now());
        store.save(record);

        let result = viewer.watch("job-1").wait().await.unwrap().unwrap();
        assert_eq!(result.status, ScanStatus::Failed);
        assert_eq!(executor.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_cancel_prevents_further_polls() {
        // Jobs never complete within this test.
        let executor = Arc::new(MockExecutor::instant(u32::MAX));
        let (viewer, store) = viewer_with(executor.clone(), 20);
        store.save(pending("job-1", ScanStatus::Running));

        let handle = viewer.watch("job-1");
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();

        let polls_at_cancel = executor.status_calls();
        assert!(polls_at_cancel >= 1);

        let outcome = handle.wait().await.unwrap();
        assert!(outcome.is_none());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(executor.status_calls(), polls_at_cancel);
    }

    #[tokio::test]
    async fn test_cancel_before_first_poll() {
        let executor = Arc::new(MockExecutor::instant(u32::MAX));
        let (viewer, store) = viewer_with(executor.clone(), 200);
        store.save(pending("job-1", ScanStatus::Queued));

        let handle = viewer.watch("job-1");
        handle.cancel();
        assert!(handle.wait().await.unwrap().is_none());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(executor.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_inflight_poll_skips_store_and_results() {
        use std::sync::atomic::{AtomicU32, Ordering};

        // Signals when a status query starts, then stalls long enough for
        // the test to cancel mid-flight. The reported status is terminal, so
        // an unguarded loop would go on to fetch results and update the store.
        struct StallingExecutor {
            entered: tokio::sync::Notify,
            results_calls: AtomicU32,
        }

        #[async_trait::async_trait]
        impl ScanExecutor for StallingExecutor {
            async fn run_scan(
                &self,
                _target: &str,
                _tool: &str,
                _input_type: &str,
            ) -> Result<crate::scanner::ScanOutcome, SentinelError> {
                unreachable!()
            }

            async fn get_job_status(
                &self,
                job_id: &str,
            ) -> Result<crate::scanner::ScanJob, SentinelError> {
                self.entered.notify_one();
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(crate::scanner::ScanJob {
                    job_id: job_id.to_string(),
                    target: "example.com".to_string(),
                    tool: "nmap".to_string(),
                    status: ScanStatus::Completed,
                    progress: None,
                    created_at: chrono::Utc::now(),
                })
            }

            async fn get_job_results(
                &self,
                _job_id: &str,
            ) -> Result<crate::models::ScanReport, SentinelError> {
                self.results_calls.fetch_add(1, Ordering::SeqCst);
                Err(SentinelError::Collaborator("should not be queried".to_string()))
            }
        }

        let executor = Arc::new(StallingExecutor {
            entered: tokio::sync::Notify::new(),
            results_calls: AtomicU32::new(0),
        });
        let store = ScanStore::new(Arc::new(MemoryStorage::new()));
        let viewer = ScanViewer::new(store.clone(), executor.clone())
            .with_poll_interval(Duration::from_millis(10));
        store.save(pending("job-1", ScanStatus::Running));

        let handle = viewer.watch("job-1");
        executor.entered.notified().await;
        handle.cancel();

        assert!(handle.wait().await.unwrap().is_none());
        assert_eq!(executor.results_calls.load(Ordering::SeqCst), 0);
        // The in-flight poll's terminal status never reached the store.
        assert_eq!(store.get_by_id("job-1").unwrap().status, ScanStatus::Running);
    }

    #[tokio::test]
    async fn test_watch_mirrors_progress_into_store() {
        let executor = Arc::new(MockExecutor::instant(1));
        let (viewer, store) = viewer_with(executor, 10);
        store.save(pending("job-1", ScanStatus::Queued));

        viewer.watch("job-1").wait().await.unwrap();

        let record = store.get_by_id("job-1").unwrap();
        assert_eq!(record.status, ScanStatus::Completed);
        assert!(record.completed_at.is_some());
        // Submission-time fields are untouched by polling.
        assert_eq!(record.target, "example.com");
        assert_eq!(record.tool, "nmap");
    }
}
