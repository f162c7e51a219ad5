pub mod commands;
pub mod history;
pub mod results;
pub mod scan;
pub mod serve;
pub mod status;
pub mod tools;

use std::path::Path;

use crate::api::{create_app_state, AppState};
use crate::config::{load_config, SentinelConfig, StorageConfig};
use crate::errors::SentinelError;

pub use commands::{Cli, Commands};

/// Builds runtime state from the global CLI options.
pub async fn build_state(cli: &Cli) -> Result<(AppState, SentinelConfig), SentinelError> {
    let mut config = load_config(cli.config.as_deref().map(Path::new)).await?;
    if let Some(dir) = &cli.data_dir {
        config.storage = Some(StorageConfig {
            data_dir: Some(dir.clone()),
        });
    }
    let state = create_app_state(&config)?;
    Ok((state, config))
}
