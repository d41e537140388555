mod config;
mod log_shell;
mod viewer;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use livemap_fetch::HttpStationFetcher;

use crate::config::ViewerConfig;
use crate::log_shell::LogMapShell;
use crate::viewer::ViewerSession;

/// Command line arguments for the station live map viewer
#[derive(Parser, Debug)]
#[command(name = "livemap-viewer")]
#[command(about = "Charging station live map viewer")]
struct Args {
    /// Path to the viewer configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the stations API, overrides the configuration
    #[arg(long)]
    api_base_url: Option<String>,

    /// Fetch and draw once, then exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt().pretty().init();

    // Load the viewer configuration, or fall back to the defaults
    let mut config = match &args.config {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            serde_json::from_str::<ViewerConfig>(&content)
                .with_context(|| format!("Failed to parse config file '{}'", path.display()))?
        }
        None => ViewerConfig::default(),
    };
    if let Some(api_base_url) = args.api_base_url {
        config.api_base_url = api_base_url;
    }

    tracing::info!("Viewer targeting {}", config.api_base_url);

    let fetcher = HttpStationFetcher::new(&config.api_base_url)
        .with_context(|| format!("Failed to build a client for '{}'", config.api_base_url))?;
    let refresh_interval = Duration::from_secs(config.refresh_interval_secs);

    let mut session = ViewerSession::new(config, fetcher, LogMapShell::default());
    session.on_station_count(|count, total_stations| {
        tracing::info!(
            "Station count changed: {} markers, {} charging stations",
            count,
            total_stations
        );
    });
    session.initialize_map();

    session.refresh().await;
    if args.once {
        return Ok(());
    }

    let mut ticker = tokio::time::interval(refresh_interval);
    // The first tick of an interval completes immediately, and the first
    // fetch already happened above.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        session.refresh().await;
    }
}
