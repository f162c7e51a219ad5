use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finding::{Finding, Severity};
use super::scan_record::ScanStatus;

/// The full result payload for one scan, as returned by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub job_id: String,
    pub tool: String,
    pub target: String,
    pub status: ScanStatus,
    pub findings: Vec<Finding>,
    pub summary: ScanSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_findings: usize,
    pub severity_breakdown: HashMap<String, usize>,
    /// Wall-clock scan duration in seconds.
    pub scan_duration: f64,
}

impl ScanReport {
    /// Builds the summary from the findings list.
    pub fn summarize(findings: &[Finding], scan_duration: f64) -> ScanSummary {
        let mut severity_breakdown: HashMap<String, usize> = HashMap::new();
        for finding in findings {
            *severity_breakdown
                .entry(finding.severity.as_str().to_string())
                .or_insert(0) += 1;
        }
        ScanSummary {
            total_findings: findings.len(),
            severity_breakdown,
            scan_duration,
        }
    }

    pub fn max_severity(&self) -> Option<Severity> {
        Severity::max_of(&self.findings)
    }
}
