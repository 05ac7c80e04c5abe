use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lobby_stats::aggregate::{AggregatorSettings, MatchAggregator};
use lobby_stats::api::state::AppState;
use lobby_stats::config::AppConfig;
use lobby_stats::models::PlayerIdentity;
use lobby_stats::provider::{RiotClient, RiotClientConfig};

#[derive(Parser)]
#[command(name = "lobby-stats")]
#[command(about = "Ranked flex match stats and MVP scoring for League of Legends")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); defaults to the config value
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the ranked lobby of the first player's latest match
    Lobby {
        /// Riot IDs as name#tag
        #[arg(required = true)]
        players: Vec<PlayerIdentity>,
    },

    /// Print recent matches and averages for one player
    Rolling {
        /// Riot ID as name#tag
        player: PlayerIdentity,
    },
}

fn build_aggregator(config: &AppConfig) -> Result<MatchAggregator> {
    config
        .validate_credentials()
        .context("Riot credentials")?;

    let client = RiotClient::new(RiotClientConfig::from_config(&config.riot)?)?;
    let aggregator = MatchAggregator::new(
        Arc::new(client),
        AggregatorSettings::from_config(&config.riot),
    );

    let settings = aggregator.settings();
    tracing::info!(
        "Queue {} ({}), {} rolling matches, {:?} per provider call",
        settings.queue_id,
        settings.queue_type,
        settings.rolling_match_count,
        settings.call_timeout
    );
    Ok(aggregator)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting lobby-stats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let aggregator = build_aggregator(&config)?;
            let state = AppState {
                aggregator: Arc::new(aggregator),
                cors_origin: config.server.cors_origin.clone(),
            };
            let app = lobby_stats::api::build_router(state);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Lobby { players } => {
            let aggregator = build_aggregator(&config)?;
            let response = aggregator.aggregate_lobby(&players).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Rolling { player } => {
            let aggregator = build_aggregator(&config)?;
            let response = aggregator.aggregate_rolling(&[player]).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
