use crate::cli::commands::{Cli, QueryArgs};
use crate::errors::SentinelError;

pub async fn handle_results(cli: &Cli, args: QueryArgs) -> Result<(), SentinelError> {
    let (state, _) = super::build_state(cli).await?;
    let record = state.viewer().resolve(&args.id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
