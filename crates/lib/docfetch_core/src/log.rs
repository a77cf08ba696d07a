//! Error reporting seam for the fetch pipeline.
//!
//! The fetcher reports every failure it absorbs through [`ErrorLog`] rather
//! than a global logger, so callers (and tests) decide where messages go.

/// Sink for error-level messages.
pub trait ErrorLog: Send + Sync {
    fn error(&self, message: &str);
}

/// Forwards messages to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}
