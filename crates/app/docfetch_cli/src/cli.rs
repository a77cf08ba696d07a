use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "docfetch", version, about = "Fetch certificates and store them as PDF files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the upstream document list once and store every certificate
    Run(RunArgs),

    /// Print the version
    Version,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Upstream endpoint returning the JSON array of document records
    #[arg(long, env = "DOCFETCH_API_URL")]
    pub api_url: String,

    /// Directory stored PDFs are written to
    #[arg(long, env = "DOCFETCH_STORAGE_PATH", default_value = "./documents")]
    pub storage: PathBuf,

    /// Upstream request timeout in seconds
    #[arg(long, env = "DOCFETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the report as JSON instead of one line per document
    #[arg(long)]
    pub json: bool,
}
