// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use docfetch_core::{DocumentFetcher, FetchReport, FetcherConfig, ProcessingOutcome};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Run(run_args) => fetch(run_args)?,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn fetch(args: &RunArgs) -> Result<()> {
    let config = FetcherConfig {
        storage_root: args.storage.clone(),
        request_timeout: Duration::from_secs(args.timeout_secs),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let batch = runtime.block_on(async {
        let fetcher = DocumentFetcher::local(&config)?;
        fetcher.fetch_and_store(&args.api_url).await
    })?;

    let report = FetchReport::from(batch);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for outcome in report.details.outcomes() {
        match outcome {
            ProcessingOutcome::Stored { file } => println!("stored  {}", file.display()),
            other => println!("failed  {}", serde_json::to_string(other)?),
        }
    }
    println!(
        "{} stored, {} failed",
        report.success_count, report.error_count
    );
    log::info!("{}", report.message);

    Ok(())
}
