use std::time::Duration;

use tracing::info;

use crate::cli::commands::{Cli, ScanArgs};
use crate::errors::SentinelError;
use crate::models::ScanStatus;
use crate::scanner::SubmitRequest;

pub async fn handle_scan(cli: &Cli, args: ScanArgs) -> Result<(), SentinelError> {
    let (state, config) = super::build_state(cli).await?;

    let req = SubmitRequest {
        target: args.target.clone(),
        tool: args.tool.clone(),
        input_type: args.input_type.clone(),
        consent: args.consent,
    };

    let record = state.submission_flow().submit(&req).await?;
    info!(id = %record.id, status = %record.status, "Scan submitted");

    if record.status.is_terminal() || args.no_wait {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("Scan {} {}; waiting for completion...", record.id, record.status);

    let viewer = state
        .viewer()
        .with_poll_interval(Duration::from_secs(config.poll_interval_secs()));
    let handle = viewer.watch(&record.id);
    let canceller = handle.canceller();

    let final_record = tokio::select! {
        result = handle.wait() => result?,
        _ = tokio::signal::ctrl_c() => {
            canceller.cancel();
            println!("Interrupted; scan {} continues in the background", record.id);
            return Ok(());
        }
    };

    match final_record {
        Some(record) => {
            if record.status == ScanStatus::Failed {
                eprintln!("Scan {} failed", record.id);
            }
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        None => println!("Watch cancelled before scan {} finished", record.id),
    }
    Ok(())
}
