use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SentinelError;
use crate::models::{ScanReport, ScanStatus};

/// Reference to a scan the collaborator accepted but has not finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanJob {
    pub job_id: String,
    pub target: String,
    pub tool: String,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub created_at: DateTime<Utc>,
}

/// What a submission got back: either a full synchronous result or a job
/// reference to poll later.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Queued(ScanJob),
}

/// The scan-execution collaborator. Implementations run (or simulate) the
/// actual tooling; the submission flow and viewer only ever talk to this
/// trait so they can be tested against a scripted double.
#[async_trait]
pub trait ScanExecutor: Send + Sync {
    /// Launches a scan. Tools that finish synchronously return
    /// `ScanOutcome::Completed`; the rest return a queued job reference.
    async fn run_scan(
        &self,
        target: &str,
        tool: &str,
        input_type: &str,
    ) -> Result<ScanOutcome, SentinelError>;

    /// Current status of a queued or running job.
    async fn get_job_status(&self, job_id: &str) -> Result<ScanJob, SentinelError>;

    /// Full results for a finished job.
    async fn get_job_results(&self, job_id: &str) -> Result<ScanReport, SentinelError>;
}
