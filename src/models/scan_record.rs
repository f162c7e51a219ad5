use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finding::Severity;
use super::report::ScanReport;

/// Lifecycle state of a submitted scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Terminal states expect no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Queued => "queued",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted scan and its outcome, as persisted in the recent-scan history.
///
/// `findings_count` and `severity` are set only on completed records;
/// `progress` is meaningful only while the scan is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub target: String,
    pub tool: String,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Full result payload when the collaborator returned one synchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScanReport>,
}

impl ScanRecord {
    /// A fresh record for a job the collaborator accepted but has not finished.
    pub fn pending(id: &str, target: &str, tool: &str, status: ScanStatus) -> Self {
        Self {
            id: id.to_string(),
            target: target.to_string(),
            tool: tool.to_string(),
            status,
            findings_count: None,
            severity: None,
            progress: None,
            created_at: Utc::now(),
            completed_at: None,
            result: None,
        }
    }

    /// A record for a scan the collaborator completed synchronously.
    pub fn completed(target: &str, tool: &str, report: ScanReport) -> Self {
        Self {
            id: report.job_id.clone(),
            target: target.to_string(),
            tool: tool.to_string(),
            status: ScanStatus::Completed,
            findings_count: Some(report.findings.len() as u32),
            severity: Severity::max_of(&report.findings),
            progress: None,
            created_at: Utc::now(),
            completed_at: Some(Utc::now()),
            result: Some(report),
        }
    }

    /// Returns a new record with the patch's fields merged over this one.
    /// Fields absent from the patch keep their prior values.
    pub fn merged(&self, patch: &ScanPatch) -> ScanRecord {
        let status = patch.status.unwrap_or(self.status);
        // Progress is only meaningful while running; a terminal transition
        // clears any stale value.
        let progress = if status.is_terminal() {
            None
        } else {
            patch.progress.or(self.progress)
        };
        ScanRecord {
            id: self.id.clone(),
            target: self.target.clone(),
            tool: self.tool.clone(),
            status,
            findings_count: patch.findings_count.or(self.findings_count),
            severity: patch.severity.or(self.severity),
            progress,
            created_at: self.created_at,
            completed_at: patch.completed_at.or(self.completed_at),
            result: patch.result.clone().or_else(|| self.result.clone()),
        }
    }
}

/// Partial update applied to a stored record. Only present fields overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanPatch {
    pub status: Option<ScanStatus>,
    pub findings_count: Option<u32>,
    pub severity: Option<Severity>,
    pub progress: Option<u8>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<ScanReport>,
}

impl ScanPatch {
    pub fn status(status: ScanStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    /// Patch that marks a record terminal with its final report attached.
    pub fn finished(report: &ScanReport) -> Self {
        Self {
            status: Some(ScanStatus::Completed),
            findings_count: Some(report.findings.len() as u32),
            severity: Severity::max_of(&report.findings),
            progress: None,
            completed_at: Some(Utc::now()),
            result: Some(report.clone()),
        }
    }
}
