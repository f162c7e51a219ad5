use crate::cli::commands::{Cli, QueryArgs};
use crate::errors::SentinelError;

pub async fn handle_status(cli: &Cli, args: QueryArgs) -> Result<(), SentinelError> {
    let (state, _) = super::build_state(cli).await?;

    if let Some(record) = state.store.get_by_id(&args.id) {
        println!(
            "{} {} {} {}{}",
            record.id,
            record.tool,
            record.target,
            record.status,
            record
                .progress
                .map(|p| format!(" ({p}%)"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    let job = state
        .executor
        .get_job_status(&args.id)
        .await
        .map_err(|_| SentinelError::NotFound(format!("Scan not found: {}", args.id)))?;
    println!(
        "{} {} {} {}{}",
        job.job_id,
        job.tool,
        job.target,
        job.status,
        job.progress.map(|p| format!(" ({p}%)")).unwrap_or_default()
    );
    Ok(())
}
