use tracing::info;

use crate::api;
use crate::cli::commands::{Cli, ServeArgs};
use crate::errors::SentinelError;

pub async fn handle_serve(cli: &Cli, args: ServeArgs) -> Result<(), SentinelError> {
    let (state, config) = super::build_state(cli).await?;

    let server = config.server.unwrap_or_default();
    let host = args
        .host
        .or(server.host)
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = args.port.or(server.port).unwrap_or(3001);

    let app = api::build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SentinelError::Internal(format!("Server error: {e}")))?;

    Ok(())
}
