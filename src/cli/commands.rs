use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sentinelx", version, about = "Security scan submission and result tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory for the persisted scan history (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a scan and follow it until it finishes
    Scan(ScanArgs),
    /// Show the current status of a scan
    Status(QueryArgs),
    /// Show the full results of a scan
    Results(QueryArgs),
    /// List the recent scan history
    History,
    /// List the available scan tools
    Tools,
    /// Start the HTTP REST API server
    Serve(ServeArgs),
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Scan target: URL, host, or file reference
    #[arg(short, long)]
    pub target: String,

    /// Scan tool to run (see `sentinelx tools`)
    #[arg(long)]
    pub tool: String,

    /// Target input kind: url, host, file
    #[arg(long, default_value = "url")]
    pub input_type: String,

    /// Confirm you have permission to scan this target
    #[arg(long)]
    pub consent: bool,

    /// Submit without waiting for a queued scan to finish
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Scan identifier
    pub id: String,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address (falls back to server.host in the config, then 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (falls back to server.port in the config, then 3001)
    #[arg(short, long)]
    pub port: Option<u16>,
}
