//! # docfetch_core
//!
//! Core fetch-and-store pipeline for Docfetch.

pub mod fetcher;
pub mod log;
pub mod models;
pub mod store;

pub use fetcher::{BatchError, DocumentFetcher, FetcherConfig, FetcherError};
pub use models::{BatchResult, DocumentRecord, FetchReport, ProcessingOutcome};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
