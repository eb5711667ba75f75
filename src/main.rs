use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use stattracker::analytics::AnalyticsService;
use stattracker::config::Config;
use stattracker::dashboard::{self, AppState};
use stattracker::models::SPORTS;
use stattracker::providers::{SportsDataProvider, TheSportsDb};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let provider = Arc::new(TheSportsDb::new(
        config.sportsdb_api_key.as_deref(),
        config.sportsdb_base_url.as_deref(),
        Duration::from_secs(config.http_timeout_secs),
    )?);
    info!("Data provider: {}", provider.name());

    let service = AnalyticsService::new(provider, config.home_advantage);
    let app = dashboard::router(AppState { service });

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Dashboard listening on http://{} ({} sports)",
        addr,
        SPORTS.len()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
