use std::path::Path;

use crate::errors::SentinelError;
use super::types::SentinelConfig;

/// Loads the YAML configuration at `path`. An absent file yields the
/// defaults; a present but malformed file is an error.
pub async fn load_config(path: Option<&Path>) -> Result<SentinelConfig, SentinelError> {
    let Some(path) = path else {
        return Ok(SentinelConfig::default());
    };

    if !path.exists() {
        return Err(SentinelError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: SentinelConfig = serde_yaml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SentinelConfig) -> Result<(), SentinelError> {
    if config.poll_interval_secs() == 0 {
        return Err(SentinelError::Config(
            "scanner.poll_interval_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
