//! Column-union merge of delimited payloads.
//!
//! [`TableMerger`] accumulates a [`HeaderSet`] and a list of [`Row`]s across any number of
//! ingested payloads. Each payload contributes its headers (appended in first-seen order) and its
//! data lines, re-aligned to the global header set by header name.
//!
//! ```rust
//! use table_merger::export::ExportFormat;
//! use table_merger::merger::TableMerger;
//!
//! let mut merger = TableMerger::new();
//! merger.ingest("A\tB\n1\t2");
//! merger.ingest("B\tC\n3\t4");
//!
//! assert_eq!(merger.headers().as_slice(), ["A", "B", "C"]);
//! assert_eq!(
//!     merger.export(ExportFormat::Tsv).unwrap(),
//!     "A\tB\tC\n1\t2\t\n\t3\t4"
//! );
//! ```

use std::collections::HashMap;

use crate::error::MergeResult;
use crate::export::{self, ExportFormat, ExportOptions};
use crate::ingestion::delimited::{TAB, parse_delimited};
use crate::types::{HeaderSet, Row, TableSnapshot};

/// What a single [`TableMerger::ingest`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The payload had a header row; its headers and rows were merged.
    Merged(IngestStats),
    /// The payload contained no non-blank lines; state is unchanged.
    Empty,
}

impl IngestOutcome {
    /// Rows appended by this ingestion (0 for [`IngestOutcome::Empty`]).
    pub fn rows_appended(&self) -> usize {
        match self {
            Self::Merged(stats) => stats.rows_appended,
            Self::Empty => 0,
        }
    }
}

/// Stats reported for a merged payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Headers this payload added to the global header set, in the order they were added.
    pub new_headers: Vec<String>,
    /// Number of data rows appended.
    pub rows_appended: usize,
}

/// Accumulated column-union table.
///
/// State only grows: headers are appended, rows are appended. [`TableMerger::reset`] is the only
/// way back to an empty table.
#[derive(Debug, Clone, Default)]
pub struct TableMerger {
    headers: HeaderSet,
    rows: Vec<Row>,
}

impl TableMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one tab-separated payload into the table.
    ///
    /// - Blank lines are discarded; fields are trimmed.
    /// - The first remaining line is the payload's header row. Unknown headers are appended to the
    ///   global header set in the order they appear.
    /// - Every following line becomes one row with a cell for each global header: the value from
    ///   the matching column of this payload, or `""` if the payload lacks that header or the line
    ///   is too short.
    /// - If the header row repeats a name, the first occurrence is used.
    ///
    /// A payload with no non-blank lines is a no-op and yields [`IngestOutcome::Empty`].
    /// Ingesting the same payload twice appends its rows twice.
    pub fn ingest(&mut self, raw: &str) -> IngestOutcome {
        let Some(parsed) = parse_delimited(raw, TAB) else {
            return IngestOutcome::Empty;
        };

        let mut local: HashMap<&str, usize> = HashMap::with_capacity(parsed.headers.len());
        let mut new_headers = Vec::new();
        for (idx, name) in parsed.headers.iter().enumerate() {
            local.entry(name.as_str()).or_insert(idx);
            if self.headers.insert(name) {
                new_headers.push(name.clone());
            }
        }

        // Global header position -> column in this payload.
        let col_idxs: Vec<Option<usize>> = self
            .headers
            .iter()
            .map(|name| local.get(name).copied())
            .collect();

        let rows_appended = parsed.records.len();
        self.rows.reserve(rows_appended);
        for record in &parsed.records {
            let cells = col_idxs
                .iter()
                .map(|idx| idx.and_then(|i| record.get(i)).cloned().unwrap_or_default())
                .collect();
            self.rows.push(Row::new(cells));
        }

        IngestOutcome::Merged(IngestStats {
            new_headers,
            rows_appended,
        })
    }

    /// Render the table in `format` using default options (quote-doubling for CSV).
    ///
    /// This only reads state; calling it repeatedly without an intervening ingest returns the
    /// same string. Writing into memory cannot fail in practice, but the CSV writer's error is
    /// still propagated.
    pub fn export(&self, format: ExportFormat) -> MergeResult<String> {
        self.export_with(&ExportOptions::new(format))
    }

    /// Render the table with explicit [`ExportOptions`].
    pub fn export_with(&self, options: &ExportOptions) -> MergeResult<String> {
        export::export_to_string(&self.headers, &self.rows, options)
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// `true` when no header has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Value of `header` in row `row`, or `None` if either does not exist.
    ///
    /// Known headers that the row's source payload lacked read as `Some("")`.
    pub fn cell(&self, row: usize, header: &str) -> Option<&str> {
        let idx = self.headers.index_of(header)?;
        self.rows.get(row).map(|r| r.cell(idx))
    }

    /// Owned copy of the state with every row padded to the current header width.
    pub fn snapshot(&self) -> TableSnapshot {
        let width = self.headers.len();
        TableSnapshot {
            headers: self.headers.as_slice().to_vec(),
            rows: self.rows.iter().map(|r| r.padded(width)).collect(),
        }
    }

    /// Forget all headers and rows.
    pub fn reset(&mut self) {
        self.headers.clear();
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{IngestOutcome, IngestStats, TableMerger};

    #[test]
    fn later_headers_are_appended_and_rows_back_filled() {
        let mut m = TableMerger::new();
        m.ingest("A\tB\n1\t2");
        let outcome = m.ingest("B\tC\n3\t4");

        assert_eq!(
            outcome,
            IngestOutcome::Merged(IngestStats {
                new_headers: vec!["C".to_string()],
                rows_appended: 1,
            })
        );
        let snap = m.snapshot();
        assert_eq!(snap.headers, vec!["A", "B", "C"]);
        assert_eq!(snap.rows, vec![vec!["1", "2", ""], vec!["", "3", "4"]]);
    }

    #[test]
    fn first_rows_are_stored_short_and_read_as_empty() {
        let mut m = TableMerger::new();
        m.ingest("A\n1");
        m.ingest("B\n2");

        assert_eq!(m.rows()[0].stored_len(), 1);
        assert_eq!(m.cell(0, "B"), Some(""));
        assert_eq!(m.cell(1, "A"), Some(""));
        assert_eq!(m.cell(1, "B"), Some("2"));
        assert_eq!(m.cell(0, "Z"), None);
        assert_eq!(m.cell(9, "A"), None);
    }

    #[test]
    fn duplicate_header_in_one_payload_uses_first_occurrence() {
        let mut m = TableMerger::new();
        m.ingest("A\tB\tA\nfirst\tb\tsecond");

        assert_eq!(m.column_count(), 2);
        assert_eq!(m.cell(0, "A"), Some("first"));
        assert_eq!(m.cell(0, "B"), Some("b"));
    }

    #[test]
    fn short_lines_pad_and_long_lines_truncate() {
        let mut m = TableMerger::new();
        m.ingest("A\tB\tC\n1\n1\t2\t3\t4");

        assert_eq!(m.snapshot().rows, vec![vec!["1", "", ""], vec!["1", "2", "3"]]);
    }

    #[test]
    fn empty_payload_is_a_no_op() {
        let mut m = TableMerger::new();
        m.ingest("A\n1");
        assert_eq!(m.ingest("\n   \n\t\n"), IngestOutcome::Empty);
        assert_eq!(m.row_count(), 1);
        assert_eq!(m.column_count(), 1);
    }

    #[test]
    fn reset_clears_state() {
        let mut m = TableMerger::new();
        m.ingest("A\tB\n1\t2");
        m.reset();

        assert!(m.is_empty());
        assert_eq!(m.row_count(), 0);
        m.ingest("C\n3");
        assert_eq!(m.headers().as_slice(), ["C"]);
    }
}
