//! wallet-web: HTTP API for a wallet connection state.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use wallet_web::config::{Config, CorsPolicy};
use wallet_web::state::AppState;

/// HTTP API for connecting, querying and clearing a wallet connection.
#[derive(Parser, Debug)]
#[command(name = "wallet-web")]
#[command(about = "HTTP API for a wallet connection state", long_about = None)]
struct Args {
    /// Address to bind the web server.
    #[arg(long, default_value = "127.0.0.1:8000")]
    address: String,

    /// File holding the wallet record.
    #[arg(long, default_value = "wallet_address.json")]
    state_file: PathBuf,

    /// Allowed CORS origin (repeatable). `*` allows every origin.
    #[arg(long = "cors-origin", default_value = "*")]
    cors_origins: Vec<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let address: SocketAddr = args.address.parse()?;

    let config = Config {
        address,
        state_file: args.state_file,
        cors: CorsPolicy::from_origins(args.cors_origins.as_slice())?,
    };

    if config.cors == CorsPolicy::Permissive {
        tracing::warn!("CORS is permissive; pass --cors-origin to restrict it");
    }

    let state = AppState::new(config).await?;
    let app = wallet_web::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("wallet-web listening on http://{}/api/", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("wallet-web stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
