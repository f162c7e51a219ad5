use crate::cli::commands::Cli;
use crate::errors::SentinelError;

pub async fn handle_history(cli: &Cli) -> Result<(), SentinelError> {
    let (state, _) = super::build_state(cli).await?;
    let scans = state.store.get_all();

    if scans.is_empty() {
        println!("No recent scans");
        return Ok(());
    }

    for scan in scans {
        println!(
            "{}  {:10}  {:16}  {}  {}",
            scan.created_at.format("%Y-%m-%d %H:%M:%S"),
            scan.status,
            scan.tool,
            scan.target,
            scan.severity
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    Ok(())
}
