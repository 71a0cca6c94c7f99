use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use table_merger::export::{CsvQuoting, ExportFormat};
use table_merger::ingestion::{CompositeObserver, FileObserver, MergeObserver, TracingObserver};
use table_merger::render::render_table;
use table_merger::session::{FileReport, MergeSession, SessionOptions};

/// table-merger: merge TSV files into one table keyed by column header.
/// Columns are the union of every file's headers, in first-seen order.
#[derive(Parser)]
#[command(name = "table-merger", version, about)]
struct Cli {
    /// TSV files or glob patterns, merged in the order given.
    inputs: Vec<String>,

    /// Write the merged table as table-data.<format> (repeatable).
    #[arg(long, value_enum)]
    export: Vec<Format>,

    /// Directory export files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Quote CSV fields without escaping embedded quotes.
    #[arg(long)]
    legacy_csv: bool,

    /// Media type of every input (e.g. text/tab-separated-values); accepts files of any extension.
    #[arg(long, value_name = "TYPE")]
    media_type: Option<String>,

    /// Print the merged table as JSON instead of a text grid.
    #[arg(long)]
    json: bool,

    /// Do not print the merged table.
    #[arg(long)]
    quiet: bool,

    /// Also append ingestion events to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Tsv,
    Csv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Tsv => ExportFormat::Tsv,
            Format::Csv => ExportFormat::Csv,
        }
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let paths = expand_inputs(&cli.inputs);
    if paths.is_empty() {
        eprintln!("usage: table-merger <FILE.tsv>... [--export tsv|csv] [--out-dir DIR]");
        process::exit(1);
    }

    let mut observers: Vec<Arc<dyn MergeObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(log) = cli.log_file.as_ref() {
        observers.push(Arc::new(FileObserver::new(log)));
    }

    let mut session = MergeSession::new(SessionOptions {
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        csv_quoting: if cli.legacy_csv {
            CsvQuoting::Legacy
        } else {
            CsvQuoting::Escaped
        },
        media_type: cli.media_type.clone(),
        ..Default::default()
    });

    let reports = session.ingest_paths(&paths);
    let merged = merged_count(&reports);
    tracing::info!(
        merged,
        skipped = reports.len() - merged,
        columns = session.merger().column_count(),
        rows = session.merger().row_count(),
        "merge finished"
    );

    if merged == 0 {
        tracing::error!(inputs = reports.len(), "no input could be merged, nothing to export");
        process::exit(exit_code(merged, false));
    }

    let mut failed = false;
    if !cli.quiet {
        if cli.json {
            match serde_json::to_string_pretty(&session.merger().snapshot()) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize table as JSON");
                    failed = true;
                }
            }
        } else {
            println!("{}", render_table(session.merger()));
        }
    }

    for format in &cli.export {
        let format = ExportFormat::from(*format);
        match session.export_to_dir(&cli.out_dir, format) {
            Ok(path) => tracing::info!(path = %path.display(), media_type = format.media_type(), "exported"),
            Err(e) => {
                tracing::error!(error = %e, file = format.file_name(), "export failed");
                failed = true;
            }
        }
    }

    process::exit(exit_code(merged, failed));
}

/// Number of inputs that were read and merged (including empty ones).
fn merged_count(reports: &[FileReport]) -> usize {
    reports.iter().filter(|r| r.result.is_ok()).count()
}

/// 0 on success; 1 when nothing was merged or an output step failed.
fn exit_code(merged: usize, output_failed: bool) -> i32 {
    if merged == 0 || output_failed { 1 } else { 0 }
}

/// Expand glob patterns; arguments that match nothing (or are not patterns) are kept verbatim so
/// the session can report them.
fn expand_inputs(inputs: &[String]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for input in inputs {
        let matches: Vec<PathBuf> = match glob::glob(input) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(e) => {
                tracing::warn!(pattern = %input, error = %e, "invalid glob pattern, using it as a path");
                Vec::new()
            }
        };
        if matches.is_empty() {
            out.push(PathBuf::from(input));
        } else {
            out.extend(matches);
        }
    }
    out
}
