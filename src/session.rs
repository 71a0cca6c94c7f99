//! File-level merge session.
//!
//! [`MergeSession`] owns a [`TableMerger`] and wires it to the file collaborators: acceptance
//! checks, reading, observer reporting, and writing export files.
//!
//! - Files are ingested strictly one at a time, in the order given; each file's headers and rows
//!   are visible to the next.
//! - A rejected or unreadable file is reported and skipped. It never touches the table and never
//!   stops the rest of a batch.
//! - If an [`MergeObserver`] is configured, every outcome is reported to it, and failures at or
//!   above [`SessionOptions::alert_at_or_above`] additionally trigger `on_alert`.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use table_merger::export::ExportFormat;
//! use table_merger::ingestion::StdErrObserver;
//! use table_merger::session::{MergeSession, SessionOptions};
//!
//! # fn main() -> Result<(), table_merger::MergeError> {
//! let mut session = MergeSession::new(SessionOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     ..Default::default()
//! });
//!
//! // `notes.txt` is rejected with a warning; the two TSV files are merged in order.
//! let reports = session.ingest_paths(["jan.tsv", "notes.txt", "feb.tsv"]);
//! println!("merged {} of {} files", reports.iter().filter(|r| r.result.is_ok()).count(), reports.len());
//!
//! let written = session.export_to_dir(".", ExportFormat::Csv)?;
//! println!("wrote {}", written.display());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{MergeError, MergeResult};
use crate::export::{self, CsvQuoting, ExportFormat, ExportOptions};
use crate::ingestion::observability::{IngestionContext, IngestionSeverity, MergeObserver};
use crate::ingestion::source::{accept_source, read_source};
use crate::merger::{IngestOutcome, TableMerger};

/// Options controlling a [`MergeSession`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct SessionOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn MergeObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
    /// Quoting used for CSV exports.
    pub csv_quoting: CsvQuoting,
    /// Media type declared for every input (e.g. `text/tab-separated-values`).
    ///
    /// When it names TSV, files are accepted regardless of extension.
    pub media_type: Option<String>,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("csv_quoting", &self.csv_quoting)
            .field("media_type", &self.media_type)
            .finish()
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
            csv_quoting: CsvQuoting::default(),
            media_type: None,
        }
    }
}

/// Result of ingesting one file in a batch.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: MergeResult<IngestOutcome>,
}

/// A [`TableMerger`] plus the file collaborators around it.
#[derive(Debug, Default)]
pub struct MergeSession {
    merger: TableMerger,
    options: SessionOptions,
}

impl MergeSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            merger: TableMerger::new(),
            options,
        }
    }

    /// The accumulated table.
    pub fn merger(&self) -> &TableMerger {
        &self.merger
    }

    /// Merge text that has already been read (no acceptance check).
    pub fn ingest_text(&mut self, text: &str) -> IngestOutcome {
        let outcome = self.merger.ingest(text);
        self.report_outcome(&IngestionContext::inline(), &outcome);
        outcome
    }

    /// Accept, read and merge one file.
    ///
    /// On error the table is left unchanged.
    pub fn ingest_path(&mut self, path: impl AsRef<Path>) -> MergeResult<IngestOutcome> {
        let path = path.as_ref();
        let ctx = IngestionContext::for_path(path);

        match accept_source(path, self.options.media_type.as_deref()).and_then(|_| read_source(path)) {
            Ok(text) => {
                let outcome = self.merger.ingest(&text);
                self.report_outcome(&ctx, &outcome);
                Ok(outcome)
            }
            Err(e) => {
                self.report_failure(&ctx, &e);
                Err(e)
            }
        }
    }

    /// Merge files in order, skipping (and reporting) any that fail.
    pub fn ingest_paths<I, P>(&mut self, paths: I) -> Vec<FileReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .map(|p| {
                let path = p.as_ref().to_path_buf();
                let result = self.ingest_path(&path);
                FileReport { path, result }
            })
            .collect()
    }

    /// Render the table in `format`, using the session's CSV quoting.
    pub fn export(&self, format: ExportFormat) -> MergeResult<String> {
        self.merger.export_with(&self.export_options(format))
    }

    /// Write the table to `dir/table-data.<ext>` and return the written path.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>, format: ExportFormat) -> MergeResult<PathBuf> {
        let target = dir.as_ref().join(format.file_name());
        let mut out = BufWriter::new(File::create(&target)?);
        export::export_to_writer(
            &mut out,
            self.merger.headers(),
            self.merger.rows(),
            &self.export_options(format),
        )?;
        Ok(target)
    }

    /// Forget all merged headers and rows.
    pub fn reset(&mut self) {
        self.merger.reset();
    }

    fn export_options(&self, format: ExportFormat) -> ExportOptions {
        ExportOptions::new(format).with_csv_quoting(self.options.csv_quoting)
    }

    fn report_outcome(&self, ctx: &IngestionContext, outcome: &IngestOutcome) {
        if let Some(obs) = self.options.observer.as_ref() {
            match outcome {
                IngestOutcome::Merged(stats) => obs.on_ingested(ctx, stats),
                IngestOutcome::Empty => obs.on_empty(ctx),
            }
        }
    }

    fn report_failure(&self, ctx: &IngestionContext, e: &MergeError) {
        if let Some(obs) = self.options.observer.as_ref() {
            let sev = IngestionSeverity::for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= self.options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}
