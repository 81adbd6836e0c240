mod cli;
mod config;
mod datasources;
mod error;
mod export;
mod logic;
mod models;
mod server;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use datasources::{ArchiveClient, GeocodingClient};
use logic::AnalysisService;
use models::AnalysisQuery;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            let (_, path) = Config::setup_interactive().context("setup failed")?;
            println!("Run `weather-odds --config {}` to start.", path.display());
        }
        None | Some(Commands::Serve) => {
            let (config, service) = load(cli.config)?;
            server::serve(service, &config.server).await?;
        }
        Some(Commands::Analyze {
            location,
            date,
            format,
        }) => {
            let (_, service) = load(cli.config)?;
            let query = AnalysisQuery::parse(&location, &date)?;
            let report = service.analyze(&query).await?;
            let output = match format {
                OutputFormat::Json => export::json_report(&report)?,
                OutputFormat::Csv => export::csv_report(&report)?,
            };
            println!("{}", output);
        }
        Some(Commands::Check) => {
            let (config, service) = load(cli.config)?;
            println!("Configuration OK");
            println!("  listen:    {}", config.server.socket_addr()?);
            println!("  history:   {} years", config.open_meteo.history_years);

            let ok = service
                .resolver()
                .test_connection()
                .await
                .unwrap_or(false);
            println!("  geocoding: {}", if ok { "OK" } else { "OFFLINE" });
            if !ok {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

type OpenMeteoService = AnalysisService<GeocodingClient, ArchiveClient>;

fn load(config_path: Option<PathBuf>) -> anyhow::Result<(Config, OpenMeteoService)> {
    let config = match Config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `weather-odds init` to create a config file");
            std::process::exit(1);
        }
    };

    let service = AnalysisService::from_config(&config).context("failed to build HTTP clients")?;
    Ok((config, service))
}
