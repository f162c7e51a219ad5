use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SentinelConfig {
    pub storage: Option<StorageConfig>,
    pub scanner: Option<ScannerConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    /// Data directory for the persisted scan history. When unset the history
    /// lives in memory only.
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScannerConfig {
    /// Seconds between status polls while a scan is non-terminal.
    pub poll_interval_secs: Option<u64>,
    /// Simulated collaborator latency in milliseconds.
    pub mock_latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Some("127.0.0.1".to_string()),
            port: Some(3001),
        }
    }
}

impl SentinelConfig {
    pub fn poll_interval_secs(&self) -> u64 {
        self.scanner
            .as_ref()
            .and_then(|s| s.poll_interval_secs)
            .unwrap_or(3)
    }

    pub fn mock_latency_ms(&self) -> u64 {
        self.scanner
            .as_ref()
            .and_then(|s| s.mock_latency_ms)
            .unwrap_or(0)
    }

    pub fn data_dir(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|s| s.data_dir.as_deref())
    }
}
