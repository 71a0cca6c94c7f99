//! `table-merger` merges tab-separated files into a single table keyed by column header name.
//!
//! Every ingested file contributes its headers to an ordered, growing header set (first-seen
//! order, no duplicates) and its data lines to a growing row list. Rows are aligned by header
//! name, so a file that lacks some columns gets `""` in those positions, and rows ingested before
//! a later file introduced new columns read as `""` there too.
//!
//! The primary entrypoint is [`merger::TableMerger`]; [`session::MergeSession`] adds file
//! acceptance, reading, observer reporting and export files on top.
//!
//! ## Quick example: merge and export
//!
//! ```rust
//! use table_merger::export::ExportFormat;
//! use table_merger::merger::TableMerger;
//!
//! let mut merger = TableMerger::new();
//! merger.ingest("A\tB\n1\t2\n");
//! merger.ingest("B\tC\n3\t4\n");
//!
//! assert_eq!(merger.headers().as_slice(), ["A", "B", "C"]);
//! assert_eq!(
//!     merger.export(ExportFormat::Tsv).unwrap(),
//!     "A\tB\tC\n1\t2\t\n\t3\t4"
//! );
//! assert_eq!(
//!     merger.export(ExportFormat::Csv).unwrap(),
//!     "\"A\",\"B\",\"C\"\n\"1\",\"2\",\"\"\n\"\",\"3\",\"4\""
//! );
//! ```
//!
//! ## Files
//!
//! ```no_run
//! use table_merger::export::ExportFormat;
//! use table_merger::session::{MergeSession, SessionOptions};
//!
//! # fn main() -> Result<(), table_merger::MergeError> {
//! let mut session = MergeSession::new(SessionOptions::default());
//! session.ingest_path("first.tsv")?;
//! session.ingest_path("second.tsv")?;
//! session.export_to_dir("out", ExportFormat::Tsv)?; // writes out/table-data.tsv
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`merger`]: the column-union merge
//! - [`export`]: TSV/CSV rendering (escaped and legacy CSV quoting)
//! - [`ingestion`]: delimited parsing, file acceptance/reading, observers
//! - [`session`]: file-level driver around the merger
//! - [`render`]: plain-text table rendering
//! - [`types`]: header set, rows, snapshots
//! - [`error`]: error types

pub mod error;
pub mod export;
pub mod ingestion;
pub mod merger;
pub mod render;
pub mod session;
pub mod types;

pub use error::{MergeError, MergeResult};
pub use merger::{IngestOutcome, IngestStats, TableMerger};
