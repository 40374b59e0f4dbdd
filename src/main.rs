use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use earthlens::config::{Cli, Config};
use earthlens::routes;
use earthlens::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    tracing::info!("Looking for config.toml in {}", data_dir.display());

    let config = Config::load(&cli)?;
    tracing::info!(
        "Backend API: {} (reports from {:?})",
        config.api.base_url,
        config.reports.source
    );

    let state = AppState::new(config.clone());
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
