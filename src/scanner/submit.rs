use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::errors::SentinelError;
use crate::models::{ScanRecord, ScanStatus};
use crate::store::ScanStore;
use super::catalog;
use super::executor::{ScanExecutor, ScanOutcome};

/// User-initiated scan request, as it arrives from the CLI or API.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub target: String,
    pub tool: String,
    #[serde(default = "default_input_type")]
    pub input_type: String,
    #[serde(default)]
    pub consent: bool,
}

fn default_input_type() -> String {
    "url".to_string()
}

/// Bridges a scan request to the executor and records the outcome.
///
/// Exactly one record is saved per accepted submission; rejected input and
/// executor failures write nothing.
pub struct SubmissionFlow {
    store: ScanStore,
    executor: Arc<dyn ScanExecutor>,
}

impl SubmissionFlow {
    pub fn new(store: ScanStore, executor: Arc<dyn ScanExecutor>) -> Self {
        Self { store, executor }
    }

    fn validate(req: &SubmitRequest) -> Result<(), SentinelError> {
        if !req.consent {
            return Err(SentinelError::Validation(
                "You must confirm you have permission to scan this target".to_string(),
            ));
        }
        if req.target.trim().is_empty() {
            return Err(SentinelError::Validation("Target must not be empty".to_string()));
        }
        if req.tool.trim().is_empty() {
            return Err(SentinelError::Validation("Tool must not be empty".to_string()));
        }
        if catalog::resolve_tool(&req.tool).is_none() {
            return Err(SentinelError::Validation(format!("Unknown tool: {}", req.tool)));
        }
        Ok(())
    }

    /// Validates the request, runs the scan once, and saves the resulting
    /// record. Returns the saved record.
    pub async fn submit(&self, req: &SubmitRequest) -> Result<ScanRecord, SentinelError> {
        Self::validate(req)?;

        let outcome = self
            .executor
            .run_scan(&req.target, &req.tool, &req.input_type)
            .await
            .map_err(|e| SentinelError::Collaborator(e.to_string()))?;

        let record = match outcome {
            ScanOutcome::Completed(report) => {
                info!(target = %req.target, tool = %req.tool, findings = report.findings.len(),
                      "Scan completed synchronously");
                ScanRecord::completed(&req.target, &req.tool, report)
            }
            ScanOutcome::Queued(job) => {
                info!(target = %req.target, tool = %req.tool, job_id = %job.job_id, "Scan queued");
                let status = match job.status {
                    ScanStatus::Running => ScanStatus::Running,
                    _ => ScanStatus::Queued,
                };
                ScanRecord::pending(&job.job_id, &req.target, &req.tool, status)
            }
        };

        self.store.save(record.clone());
        Ok(record)
    }
}
