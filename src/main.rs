use clap::Parser;
use tracing_subscriber::EnvFilter;

use sentinelx::cli::{self, Cli, Commands};
use sentinelx::errors::SentinelError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match &cli.command {
        Commands::Scan(args) => cli::scan::handle_scan(&cli, args.clone()).await,
        Commands::Status(args) => cli::status::handle_status(&cli, args.clone()).await,
        Commands::Results(args) => cli::results::handle_results(&cli, args.clone()).await,
        Commands::History => cli::history::handle_history(&cli).await,
        Commands::Tools => cli::tools::handle_tools().await,
        Commands::Serve(args) => cli::serve::handle_serve(&cli, args.clone()).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                SentinelError::Validation(_) => 2,
                SentinelError::Config(_) => 3,
                SentinelError::NotFound(_) => 4,
                SentinelError::Collaborator(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
