//! Document records, per-record outcomes, and batch results.

use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Failure reason for a record missing a required field.
pub const INVALID_DOCUMENT_FORMAT: &str = "Invalid document format";
/// Failure reason for a certificate that is not valid base64.
pub const DECODE_FAILED: &str = "Failed to decode certificate";
/// Failure reason for a decoded certificate that could not be written.
pub const STORE_FAILED: &str = "Failed to store file";
/// Summary message returned once a batch has been processed.
pub const FETCH_COMPLETED: &str = "Document fetching completed.";

/// One JSON object from the upstream API.
///
/// The raw object is kept as-is so it can be echoed back when the record
/// turns out to be malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    raw: Map<String, Value>,
}

/// Borrowed view over the three fields a record needs to be stored.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFields<'a> {
    pub certificate: &'a Value,
    pub doc_no: &'a Value,
    pub description: &'a Value,
}

impl DocumentRecord {
    pub fn new(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    /// Returns the field value, treating JSON `null` as absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.raw.get(name).filter(|v| !v.is_null())
    }

    /// Returns all required fields, or `None` if any is missing.
    pub fn required_fields(&self) -> Option<RequiredFields<'_>> {
        Some(RequiredFields {
            certificate: self.field("certificate")?,
            doc_no: self.field("doc_no")?,
            description: self.field("description")?,
        })
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }
}

impl RequiredFields<'_> {
    /// `{description}_{doc_no}.pdf`, with no sanitization of either part.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.pdf",
            value_text(self.description),
            value_text(self.doc_no)
        )
    }
}

/// Renders a JSON value the way it should appear inside a file name.
///
/// Strings are used verbatim. Whole floats drop their fraction (`1.0` is
/// `1`), booleans become `1` or the empty string, and arrays or objects use
/// their compact JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Result of processing one record, or the single entry for a failed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingOutcome {
    /// Certificate decoded and written to `file`.
    Stored { file: PathBuf },
    /// Record was well-formed but decoding or writing failed.
    Failed { reason: String, doc_no: Value },
    /// Record was missing a required field.
    InvalidRecord { document: Map<String, Value> },
    /// The upstream fetch itself failed; no record was processed.
    FetchFailed { message: String },
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Stored { .. })
    }

    /// Failure reason, `None` for a stored record.
    pub fn error(&self) -> Option<&str> {
        match self {
            ProcessingOutcome::Stored { .. } => None,
            ProcessingOutcome::Failed { reason, .. } => Some(reason.as_str()),
            ProcessingOutcome::InvalidRecord { .. } => Some(INVALID_DOCUMENT_FORMAT),
            ProcessingOutcome::FetchFailed { message } => Some(message.as_str()),
        }
    }
}

impl Serialize for ProcessingOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProcessingOutcome::Stored { file } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("file", &file.to_string_lossy())?;
                map.end()
            }
            ProcessingOutcome::Failed { reason, doc_no } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", reason)?;
                map.serialize_entry("doc_no", doc_no)?;
                map.end()
            }
            ProcessingOutcome::InvalidRecord { document } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", INVALID_DOCUMENT_FORMAT)?;
                map.serialize_entry("document", document)?;
                map.end()
            }
            ProcessingOutcome::FetchFailed { message } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

/// Ordered outcomes of one fetch, one per upstream record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    outcomes: Vec<ProcessingOutcome>,
}

impl BatchResult {
    pub fn new(outcomes: Vec<ProcessingOutcome>) -> Self {
        Self { outcomes }
    }

    /// Single-entry batch describing a fetch that never produced records.
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self {
            outcomes: vec![ProcessingOutcome::FetchFailed {
                message: message.into(),
            }],
        }
    }

    pub fn outcomes(&self) -> &[ProcessingOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

/// Aggregated view of a batch, as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchReport {
    pub message: String,
    pub success_count: usize,
    pub error_count: usize,
    pub details: BatchResult,
}

impl From<BatchResult> for FetchReport {
    fn from(details: BatchResult) -> Self {
        Self {
            message: FETCH_COMPLETED.to_string(),
            success_count: details.success_count(),
            error_count: details.error_count(),
            details,
        }
    }
}
