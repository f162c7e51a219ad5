use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use crate::errors::SentinelError;
use crate::models::{Finding, ScanReport, ScanStatus, Severity};
use super::executor::{ScanExecutor, ScanJob, ScanOutcome};

/// Tools that produce a full report synchronously instead of queueing a job.
const SYNC_TOOLS: &[&str] = &["ssl_check", "headers_audit"];

/// Simulated scan-execution collaborator.
///
/// Web-security checks complete synchronously with canned findings; other
/// tools return a queued job whose status advances to completed after a
/// fixed number of polls. Latency is configurable so the CLI can feel like a
/// real backend while tests run with none.
pub struct MockExecutor {
    latency: Duration,
    /// Status polls a job reports as running before turning completed.
    polls_until_complete: u32,
    run_calls: AtomicU32,
    status_calls: AtomicU32,
    results_calls: AtomicU32,
}

impl MockExecutor {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            polls_until_complete: 3,
            run_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            results_calls: AtomicU32::new(0),
        }
    }

    /// Zero-latency executor whose jobs complete after `polls` status queries.
    pub fn instant(polls: u32) -> Self {
        Self {
            latency: Duration::ZERO,
            polls_until_complete: polls,
            run_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            results_calls: AtomicU32::new(0),
        }
    }

    pub fn run_calls(&self) -> u32 {
        self.run_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn results_calls(&self) -> u32 {
        self.results_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn finding(id: &str, title: &str, severity: Severity, description: &str, evidence: &str, remediation: &str) -> Finding {
        Finding {
            id: id.to_string(),
            title: title.to_string(),
            severity,
            description: description.to_string(),
            evidence: Some(evidence.to_string()),
            remediation: Some(remediation.to_string()),
            references: None,
        }
    }

    fn web_security_report(job_id: &str, target: &str, tool: &str) -> ScanReport {
        let findings = vec![
            Self::finding(
                "finding-1",
                "Missing Security Header",
                Severity::Medium,
                "The application is missing the X-Content-Type-Options header",
                "HTTP response headers analysis",
                "Add \"X-Content-Type-Options: nosniff\" header to prevent MIME type sniffing",
            ),
            Self::finding(
                "finding-2",
                "Weak SSL Configuration",
                Severity::High,
                "TLS 1.0 is still enabled on the server",
                "SSL/TLS configuration scan",
                "Disable TLS 1.0 and 1.1, use only TLS 1.2 and above",
            ),
        ];
        let summary = ScanReport::summarize(&findings, 3.2);
        ScanReport {
            job_id: job_id.to_string(),
            tool: tool.to_string(),
            target: target.to_string(),
            status: ScanStatus::Completed,
            findings,
            summary,
            raw_output: None,
            created_at: Utc::now(),
        }
    }

    fn network_report(job_id: &str, target: &str, tool: &str) -> ScanReport {
        let findings = vec![
            Self::finding(
                "finding-1",
                "Open Port Detected",
                Severity::Info,
                "Port 80 (HTTP) is open",
                "Nmap scan results",
                "Verify that this service is required and properly secured",
            ),
            Self::finding(
                "finding-2",
                "Outdated Service Version",
                Severity::High,
                "Apache/2.2.15 detected - this version has known vulnerabilities",
                "Service version detection",
                "Update Apache to the latest stable version",
            ),
        ];
        let summary = ScanReport::summarize(&findings, 15.7);
        ScanReport {
            job_id: job_id.to_string(),
            tool: tool.to_string(),
            target: target.to_string(),
            status: ScanStatus::Completed,
            findings,
            summary,
            raw_output: Some(
                "Starting Nmap scan...\n\nPORT   STATE SERVICE VERSION\n\
                 80/tcp open  http    Apache httpd 2.2.15\n\
                 443/tcp open  ssl/http Apache httpd 2.2.15\n\n\
                 Scan completed in 15.7 seconds"
                    .to_string(),
            ),
            created_at: Utc::now(),
        }
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl ScanExecutor for MockExecutor {
    async fn run_scan(
        &self,
        target: &str,
        tool: &str,
        _input_type: &str,
    ) -> Result<ScanOutcome, SentinelError> {
        self.run_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let job_id = format!("job-{}", uuid::Uuid::new_v4());
        if SYNC_TOOLS.contains(&tool) {
            return Ok(ScanOutcome::Completed(Self::web_security_report(
                &job_id, target, tool,
            )));
        }

        Ok(ScanOutcome::Queued(ScanJob {
            job_id,
            target: target.to_string(),
            tool: tool.to_string(),
            status: ScanStatus::Queued,
            progress: None,
            created_at: Utc::now(),
        }))
    }

    async fn get_job_status(&self, job_id: &str) -> Result<ScanJob, SentinelError> {
        let polls = self.status_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.simulate_latency().await;

        let status = if polls > self.polls_until_complete {
            ScanStatus::Completed
        } else {
            ScanStatus::Running
        };
        let progress = match status {
            ScanStatus::Running => Some(rand::thread_rng().gen_range(0..100)),
            _ => None,
        };

        Ok(ScanJob {
            job_id: job_id.to_string(),
            target: "example.com".to_string(),
            tool: "nmap".to_string(),
            status,
            progress,
            created_at: Utc::now(),
        })
    }

    async fn get_job_results(&self, job_id: &str) -> Result<ScanReport, SentinelError> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        Ok(Self::network_report(job_id, "example.com", "nmap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_tool_returns_completed_report() {
        let executor = MockExecutor::default();
        let outcome = executor.run_scan("example.com", "ssl_check", "url").await.unwrap();

        match outcome {
            ScanOutcome::Completed(report) => {
                assert_eq!(report.status, ScanStatus::Completed);
                assert_eq!(report.findings.len(), 2);
                assert_eq!(report.max_severity(), Some(Severity::High));
            }
            ScanOutcome::Queued(_) => panic!("expected a synchronous report"),
        }
    }

    #[tokio::test]
    async fn test_async_tool_returns_queued_job() {
        let executor = MockExecutor::default();
        let outcome = executor.run_scan("192.168.1.1", "nmap", "host").await.unwrap();

        match outcome {
            ScanOutcome::Queued(job) => {
                assert_eq!(job.status, ScanStatus::Queued);
                assert!(job.job_id.starts_with("job-"));
            }
            ScanOutcome::Completed(_) => panic!("expected a queued job"),
        }
    }

    #[tokio::test]
    async fn test_job_completes_after_configured_polls() {
        let executor = MockExecutor::instant(2);

        let first = executor.get_job_status("job-1").await.unwrap();
        assert_eq!(first.status, ScanStatus::Running);
        assert!(first.progress.is_some());

        let second = executor.get_job_status("job-1").await.unwrap();
        assert_eq!(second.status, ScanStatus::Running);

        let third = executor.get_job_status("job-1").await.unwrap();
        assert_eq!(third.status, ScanStatus::Completed);
        assert!(third.progress.is_none());
    }
}
