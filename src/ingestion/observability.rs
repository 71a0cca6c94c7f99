use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::MergeError;
use crate::merger::IngestStats;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a rejected file).
    Warning,
    /// Error-level event (the file could not be merged).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl IngestionSeverity {
    /// Severity assigned to a failed ingestion.
    pub fn for_error(e: &MergeError) -> Self {
        match e {
            MergeError::RejectedInput { .. } => Self::Warning,
            MergeError::InvalidEncoding { .. } => Self::Error,
            MergeError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            MergeError::Io(_) => Self::Critical,
        }
    }
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path, or `None` for text handed over directly.
    pub path: Option<PathBuf>,
}

impl IngestionContext {
    pub fn for_path(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    pub fn inline() -> Self {
        Self { path: None }
    }

    fn source(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "<inline>".to_string(),
        }
    }
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait MergeObserver: Send + Sync {
    /// Called when a payload was merged.
    fn on_ingested(&self, _ctx: &IngestionContext, _stats: &IngestStats) {}

    /// Called when a payload had no non-blank lines and was ignored.
    fn on_empty(&self, _ctx: &IngestionContext) {}

    /// Called when a file was rejected or could not be read.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &MergeError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn MergeObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn MergeObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl MergeObserver for CompositeObserver {
    fn on_ingested(&self, ctx: &IngestionContext, stats: &IngestStats) {
        for o in &self.observers {
            o.on_ingested(ctx, stats);
        }
    }

    fn on_empty(&self, ctx: &IngestionContext) {
        for o in &self.observers {
            o.on_empty(ctx);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl MergeObserver for StdErrObserver {
    fn on_ingested(&self, ctx: &IngestionContext, stats: &IngestStats) {
        eprintln!(
            "[merge][ok] source={} rows={} new_headers={:?}",
            ctx.source(),
            stats.rows_appended,
            stats.new_headers
        );
    }

    fn on_empty(&self, ctx: &IngestionContext) {
        eprintln!("[merge][empty] source={}", ctx.source());
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        eprintln!("[merge][{:?}] source={} err={}", severity, ctx.source(), error);
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        eprintln!("[ALERT][merge][{:?}] source={} err={}", severity, ctx.source(), error);
    }
}

/// Emits ingestion events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl MergeObserver for TracingObserver {
    fn on_ingested(&self, ctx: &IngestionContext, stats: &IngestStats) {
        tracing::info!(
            source = %ctx.source(),
            rows = stats.rows_appended,
            new_headers = ?stats.new_headers,
            "merged file"
        );
    }

    fn on_empty(&self, ctx: &IngestionContext) {
        tracing::debug!(source = %ctx.source(), "file has no non-blank lines, skipped");
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        match severity {
            IngestionSeverity::Info => tracing::info!(source = %ctx.source(), %error, "skipped file"),
            IngestionSeverity::Warning => tracing::warn!(source = %ctx.source(), %error, "skipped file"),
            IngestionSeverity::Error | IngestionSeverity::Critical => {
                tracing::error!(source = %ctx.source(), ?severity, %error, "failed to ingest file")
            }
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        tracing::error!(source = %ctx.source(), ?severity, %error, "ALERT: ingestion failure at alert threshold");
    }
}

/// Appends ingestion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl MergeObserver for FileObserver {
    fn on_ingested(&self, ctx: &IngestionContext, stats: &IngestStats) {
        self.append_line(&format!(
            "{} ok source={} rows={} new_headers={:?}",
            unix_ts(),
            ctx.source(),
            stats.rows_appended,
            stats.new_headers
        ));
    }

    fn on_empty(&self, ctx: &IngestionContext) {
        self.append_line(&format!("{} empty source={}", unix_ts(), ctx.source()));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        self.append_line(&format!(
            "{} fail severity={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.source(),
            error
        ));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &MergeError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.source(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
