//! Export of the merged table to delimited text.
//!
//! Output is a header line followed by one line per row, lines joined by `\n` with no trailing
//! newline. Every line carries exactly one field per header, resolved against the current header
//! set, so rows ingested before later headers appeared export `""` for those columns.
//!
//! - [`ExportFormat::Tsv`]: fields joined by tabs, no escaping.
//! - [`ExportFormat::Csv`] with [`CsvQuoting::Escaped`] (default): every field quoted, embedded
//!   quotes doubled.
//! - [`ExportFormat::Csv`] with [`CsvQuoting::Legacy`]: every field quoted, nothing escaped.
//!
//! ```rust
//! use table_merger::export::{CsvQuoting, ExportFormat, ExportOptions};
//! use table_merger::merger::TableMerger;
//!
//! let mut merger = TableMerger::new();
//! merger.ingest("A\nsay \"hi\"");
//!
//! assert_eq!(merger.export(ExportFormat::Csv).unwrap(), "\"A\"\n\"say \"\"hi\"\"\"");
//!
//! let legacy = ExportOptions::new(ExportFormat::Csv).with_csv_quoting(CsvQuoting::Legacy);
//! assert_eq!(merger.export_with(&legacy).unwrap(), "\"A\"\n\"say \"hi\"\"");
//! ```

mod format;

use std::io::{self, Write};

use crate::error::MergeResult;
use crate::types::{HeaderSet, Row};

pub use format::{CsvQuoting, ExportFormat, ExportOptions};

/// Render `headers` and `rows` as a delimited string.
///
/// Returns an empty string when there are no headers.
pub fn export_to_string(headers: &HeaderSet, rows: &[Row], options: &ExportOptions) -> MergeResult<String> {
    if headers.is_empty() {
        return Ok(String::new());
    }

    match (options.format, options.csv_quoting) {
        (ExportFormat::Tsv, _) => Ok(join_lines(headers, rows, options.format, |field, out| {
            out.push_str(field)
        })),
        (ExportFormat::Csv, CsvQuoting::Legacy) => Ok(join_lines(headers, rows, options.format, |field, out| {
            out.push('"');
            out.push_str(field);
            out.push('"');
        })),
        (ExportFormat::Csv, CsvQuoting::Escaped) => write_escaped_csv(headers, rows),
    }
}

/// Render to `writer` (e.g. an export file).
pub fn export_to_writer<W: Write>(
    writer: &mut W,
    headers: &HeaderSet,
    rows: &[Row],
    options: &ExportOptions,
) -> MergeResult<()> {
    let out = export_to_string(headers, rows, options)?;
    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn join_lines<F>(headers: &HeaderSet, rows: &[Row], format: ExportFormat, mut push_field: F) -> String
where
    F: FnMut(&str, &mut String),
{
    let sep = char::from(format.separator());
    let width = headers.len();
    let mut out = String::new();

    push_line(headers.iter(), sep, &mut push_field, &mut out);
    for row in rows {
        out.push('\n');
        push_line((0..width).map(|i| row.cell(i)), sep, &mut push_field, &mut out);
    }
    out
}

fn push_line<'a, I, F>(fields: I, sep: char, push_field: &mut F, out: &mut String)
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str, &mut String),
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        push_field(field, out);
    }
}

fn write_escaped_csv(headers: &HeaderSet, rows: &[Row]) -> MergeResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(ExportFormat::Csv.separator())
        .quote_style(csv::QuoteStyle::Always)
        .double_quote(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let width = headers.len();
    wtr.write_record(headers.iter())?;
    for row in rows {
        wtr.write_record((0..width).map(|i| row.cell(i)))?;
    }

    let buf = wtr.into_inner().map_err(|e| e.into_error())?;
    let mut out = String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
