use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perrymill::router::create_router;
use perrymill::state::AppState;
use perrymill_core::AppConfig;

#[derive(Parser)]
#[command(name = "perrymill")]
#[command(version, about = "Perry Mill news digest HTTP API")]
struct Cli {
    /// Path to a config file (defaults to ~/.config/perrymill/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(&path)?;
            config.apply_env_overrides();
            config
        }
        None => AppConfig::load()?,
    };

    if !config.has_openai_key() {
        tracing::warn!("No OpenAI API key configured; /api/analyze will be unavailable");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
