use crate::analyzer::RouteAnalyzer;
use crate::app_config::AppConfig;
use crate::cli::Cli;
use crate::hazards::AdvisoryRegistry;
use clap::Parser;
use tracing::{error, info};

mod analyzer;
mod app_config;
mod cli;
mod domain;
mod gdacs;
mod geo_point_serde;
mod hazards;
mod http_client;
mod imagery;
mod nominatim;
mod openweather;
mod osrm;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("🛰️ Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&cli.config)?;
    info!("✅  Loaded configuration");

    let registry = AdvisoryRegistry::load_from(config.advisories().file()).await?;
    let client = http_client::new_client(&config)?;
    let analyzer = RouteAnalyzer::new(client, &config, registry);
    info!("✅  Initialized route analyzer");

    let request = cli.route_request()?;
    let analysis = analyzer.analyze(&request).await.inspect_err(|e| {
        error!(status = e.status_code(), "❌ Route analysis failed: {}", e);
    })?;
    info!("✅  Found {} hazard(s) along the route", analysis.hazards.len());

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
