use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use kaldi_serve::{AppState, ServerConfig, create_engine, routes};

/// kaldi-serve - streaming speech recognition server
#[derive(Parser, Debug)]
#[command(name = "kaldi-serve")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file or environment
    let config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path)?
    } else {
        ServerConfig::from_env()?
    };

    // Load the shared model once; it is read-only for the process lifetime
    // and shared by every call's session.
    let engine = create_engine(&config.engine).map_err(|e| anyhow!(e.to_string()))?;
    info!(
        backend = engine.name(),
        model_path = %config.engine.model_path.display(),
        sample_rate = config.engine.sample_rate,
        "Decoder engine ready"
    );

    let address = config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    // Create application state and routes
    let app_state = AppState::new(config, engine);
    let app = routes::create_router().with_state(app_state);

    // Plain TCP, no transport encryption in the baseline deployment.
    info!("kaldi-serve streaming server listening on {socket_addr}");

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
