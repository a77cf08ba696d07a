// @awa-component: DOC-DocumentFetcher
//
//! Fetch-and-store pipeline.
//!
//! One GET against the upstream API, then each record is validated, its
//! certificate base64-decoded and written to `<storage_root>/<description>_<doc_no>.pdf`.
//! Records are processed sequentially and independently: a bad record only
//! affects its own outcome. A failed fetch yields a single-entry batch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::log::{ErrorLog, TracingErrorLog};
use crate::models::{
    BatchResult, DECODE_FAILED, DocumentRecord, INVALID_DOCUMENT_FORMAT, ProcessingOutcome,
    STORE_FAILED, value_text,
};
use crate::store::{DocumentStore, LocalDocumentStore, StoreError};

/// Default upstream request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that stop a fetch from running at all.
///
/// Upstream and per-record failures are not errors here; they are reported
/// in-band as [`ProcessingOutcome`]s.
#[derive(Debug, Error)]
pub enum FetcherError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Why an upstream fetch produced no records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("Failed to reach the API: {0}")]
    Transport(String),

    #[error("Failed to fetch data from the API. HTTP status code: {0}")]
    Status(u16),

    #[error("Invalid response format from the API.")]
    Format,
}

/// Settings for [`DocumentFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Directory that stored documents are written under.
    pub storage_root: PathBuf,
    /// Timeout applied to the upstream request.
    pub request_timeout: Duration,
}

impl FetcherConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Fetches document records and stores their certificates.
pub struct DocumentFetcher {
    client: Client,
    storage_root: PathBuf,
    store: Arc<dyn DocumentStore>,
    log: Arc<dyn ErrorLog>,
}

impl DocumentFetcher {
    pub fn new(
        config: &FetcherConfig,
        store: Arc<dyn DocumentStore>,
        log: Arc<dyn ErrorLog>,
    ) -> Result<Self, FetcherError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            storage_root: config.storage_root.clone(),
            store,
            log,
        })
    }

    /// Fetcher writing to the local filesystem and logging through `tracing`.
    pub fn local(config: &FetcherConfig) -> Result<Self, FetcherError> {
        Self::new(
            config,
            Arc::new(LocalDocumentStore),
            Arc::new(TracingErrorLog),
        )
    }

    /// Fetch all records from `api_url` and store each certificate.
    ///
    /// Returns one outcome per record in upstream order, or a single
    /// `FetchFailed` outcome if the upstream could not be read.
    pub async fn fetch_and_store(&self, api_url: &str) -> Result<BatchResult, FetcherError> {
        info!(api_url, "fetching documents");

        let records = match self.fetch_records(api_url).await {
            Ok(records) => records,
            Err(e) => {
                let message = e.to_string();
                self.log.error(&format!(
                    "Error occurred while fetching documents: {message}"
                ));
                return Ok(BatchResult::fetch_failed(message));
            }
        };

        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            outcomes.push(self.process_record(record).await?);
        }
        let batch = BatchResult::new(outcomes);

        info!(
            records = batch.len(),
            stored = batch.success_count(),
            failed = batch.error_count(),
            "document fetch completed"
        );
        Ok(batch)
    }

    async fn fetch_records(&self, api_url: &str) -> Result<Vec<DocumentRecord>, BatchError> {
        let resp = self
            .client
            .get(api_url)
            .send()
            .await
            .map_err(|e| BatchError::Transport(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(BatchError::Status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| BatchError::Transport(e.to_string()))?;
        debug!(bytes = body.len(), "upstream response received");

        parse_records(&body)
    }

    async fn process_record(
        &self,
        record: DocumentRecord,
    ) -> Result<ProcessingOutcome, FetcherError> {
        let Some(fields) = record.required_fields() else {
            self.log.error(&format!(
                "{INVALID_DOCUMENT_FORMAT}: {}",
                Value::Object(record.raw().clone())
            ));
            return Ok(ProcessingOutcome::InvalidRecord {
                document: record.into_raw(),
            });
        };

        let doc_no = fields.doc_no.clone();

        let Some(bytes) = decode_certificate(fields.certificate) else {
            self.log.error(&format!(
                "{DECODE_FAILED} for doc_no: {}",
                value_text(&doc_no)
            ));
            return Ok(ProcessingOutcome::Failed {
                reason: DECODE_FAILED.to_string(),
                doc_no,
            });
        };

        let file = document_path(&self.storage_root, &fields.file_name());
        match self.store.write(&file, bytes).await {
            Ok(()) => {
                debug!(file = %file.display(), "document stored");
                Ok(ProcessingOutcome::Stored { file })
            }
            Err(StoreError::Internal(msg)) => Err(FetcherError::StoreUnavailable(msg)),
            Err(e) => {
                self.log.error(&format!("{STORE_FAILED}: {e}"));
                Ok(ProcessingOutcome::Failed {
                    reason: STORE_FAILED.to_string(),
                    doc_no,
                })
            }
        }
    }
}

/// Parse an upstream body that must be a JSON array of objects.
pub fn parse_records(body: &[u8]) -> Result<Vec<DocumentRecord>, BatchError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| BatchError::Format)?;
    let Value::Array(items) = value else {
        return Err(BatchError::Format);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(DocumentRecord::new(map)),
            _ => Err(BatchError::Format),
        })
        .collect()
}

/// `<root>/<file_name>` by plain concatenation.
///
/// `Path::join` replaces the root when `file_name` is absolute. A leading `/`
/// in upstream data must not move the file out of the root.
pub fn document_path(root: &Path, file_name: &str) -> PathBuf {
    let mut path = OsString::from(root.as_os_str());
    if !root.as_os_str().to_string_lossy().ends_with('/') {
        path.push("/");
    }
    path.push(file_name);
    PathBuf::from(path)
}

fn decode_certificate(certificate: &Value) -> Option<Vec<u8>> {
    STANDARD.decode(certificate.as_str()?).ok()
}
