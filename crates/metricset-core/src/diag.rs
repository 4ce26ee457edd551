//! Diagnostics side-channel.
//!
//! Validation in this crate is permissive: a bad metric name, label key or
//! type is stored as given and reported here. A [`Diagnostics`] handle is
//! owned by the `Collection` and cloned into every `Metric` it creates.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Metric the event concerns, if any.
    pub metric: Option<String>,
    pub message: String,
}

/// Receiver of diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diag: &Diagnostic);
}

/// Forwards diagnostics as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diag: &Diagnostic) {
        let metric = diag.metric.as_deref().unwrap_or("");
        match diag.severity {
            Severity::Debug => tracing::debug!(metric, "{}", diag.message),
            Severity::Info => tracing::info!(metric, "{}", diag.message),
            Severity::Warning => tracing::warn!(metric, "{}", diag.message),
            Severity::Error => tracing::error!(metric, "{}", diag.message),
        }
    }
}

/// Keeps every diagnostic in memory (and still forwards to tracing).
#[derive(Debug, Default)]
pub struct Recorder {
    records: Mutex<Vec<Diagnostic>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        match self.records.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded at exactly `severity`.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message)
            .collect()
    }

    pub fn clear(&self) {
        match self.records.lock() {
            Ok(mut g) => g.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticSink for Recorder {
    fn emit(&self, diag: &Diagnostic) {
        TracingSink.emit(diag);
        match self.records.lock() {
            Ok(mut g) => g.push(diag.clone()),
            Err(poisoned) => poisoned.into_inner().push(diag.clone()),
        }
    }
}

/// Cloneable handle to a sink.
#[derive(Clone)]
pub struct Diagnostics {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl Diagnostics {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Handle backed by a fresh [`Recorder`]; the recorder is returned for inspection.
    pub fn recording() -> (Self, Arc<Recorder>) {
        let rec = Arc::new(Recorder::new());
        (Self::new(rec.clone()), rec)
    }

    pub fn emit(&self, severity: Severity, metric: Option<&str>, message: impl Into<String>) {
        self.sink.emit(&Diagnostic {
            severity,
            metric: metric.map(str::to_string),
            message: message.into(),
        });
    }

    pub fn debug(&self, metric: &str, message: impl Into<String>) {
        self.emit(Severity::Debug, Some(metric), message);
    }

    pub fn info(&self, metric: &str, message: impl Into<String>) {
        self.emit(Severity::Info, Some(metric), message);
    }

    pub fn warn(&self, metric: &str, message: impl Into<String>) {
        self.emit(Severity::Warning, Some(metric), message);
    }

    pub fn error(&self, metric: &str, message: impl Into<String>) {
        self.emit(Severity::Error, Some(metric), message);
    }
}
