use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sparplan_api::cli::Cli;
use sparplan_api::config::AppConfig;
use sparplan_api::database::DatabaseManager;
use sparplan_api::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sparplan_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("loading configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    info!("Starting sparplan-api in {:?} mode", config.environment);

    let bind_addr = config.bind_address();

    let state = if cli.in_memory {
        warn!("Running with in-memory stores; all data is lost on exit");
        AppState::in_memory(config)?
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        if cli.skip_migrations {
            info!("Skipping database migrations");
        } else {
            DatabaseManager::migrate(&pool).await?;
        }
        AppState::postgres(config, pool)?
    };

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    server::serve(listener, state).await
}
