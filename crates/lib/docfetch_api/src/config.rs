//! API server configuration.

use std::path::PathBuf;
use std::time::Duration;

use docfetch_core::FetcherConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Upstream endpoint returning the JSON array of document records.
    pub api_url: String,
    /// Directory stored PDFs are written to.
    pub storage_root: PathBuf,
    /// Timeout for the upstream request.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Settings for the [`docfetch_core::DocumentFetcher`] behind `/fetch`.
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            storage_root: self.storage_root.clone(),
            request_timeout: self.request_timeout,
        }
    }
}
