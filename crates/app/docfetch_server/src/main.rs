//! Docfetch API server binary.
//!
//! Serves `GET /fetch`, which pulls the configured upstream document list
//! and stores each certificate under the storage directory.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use docfetch_api::config::ApiConfig;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "docfetch_server", about = "Docfetch API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind_addr: String,

    /// Upstream endpoint returning the JSON array of document records.
    #[arg(long, env = "DOCFETCH_API_URL")]
    api_url: String,

    /// Directory stored PDFs are written to.
    #[arg(long, env = "DOCFETCH_STORAGE_PATH", default_value = "./documents")]
    storage_path: PathBuf,

    /// Upstream request timeout in seconds.
    #[arg(long, env = "DOCFETCH_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| {
                    tracing_subscriber::EnvFilter::try_new(
                        "info,docfetch_api=debug,docfetch_core=debug",
                    )
                })?,
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        api_url: args.api_url,
        storage_root: args.storage_path,
        request_timeout: Duration::from_secs(args.timeout_secs),
    };

    info!(
        api_url = %config.api_url,
        storage_root = %config.storage_root.display(),
        "starting docfetch_server"
    );

    let state = docfetch_api::AppState::from_config(config.clone())?;
    let app = docfetch_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
